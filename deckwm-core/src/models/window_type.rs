use serde::{Deserialize, Serialize};

/// `_NET_WM_WINDOW_TYPE` classification as reported by the display server.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    Notification,
    Tooltip,
    #[default]
    Normal,
}

impl WindowType {
    /// Normal and dialog windows become clients, everything else is left unmanaged.
    #[must_use]
    pub const fn is_manageable(self) -> bool {
        matches!(self, Self::Normal | Self::Dialog)
    }
}
