use serde::{Deserialize, Serialize};

/// The `_NET_WM_STATE` entries the window manager maintains on clients.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowState {
    Hidden,
    Fullscreen,
}
