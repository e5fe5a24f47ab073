//! What the display server knows about a window when it reports it.
use super::{FocusDelivery, Handle, WindowHandle, WindowType, Xyhw};
use serde::{Deserialize, Serialize};

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub name: Option<String>,
    pub r#type: WindowType,
    /// `WM_TRANSIENT_FOR` is set.
    pub transient: bool,
    /// `_NET_WM_STATE` carries the fullscreen atom.
    pub fullscreen: bool,
    /// `_NET_WM_STATE` carries the hidden atom.
    pub hidden: bool,
    pub focus: FocusDelivery,
    pub geometry: Xyhw,
}

impl<H: Handle> WindowInfo<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, name: Option<String>, r#type: WindowType) -> Self {
        Self {
            handle,
            name,
            r#type,
            transient: false,
            fullscreen: false,
            hidden: false,
            focus: FocusDelivery::Direct,
            geometry: Xyhw::default(),
        }
    }
}

/// Extra facts about a window found at startup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdoptInfo {
    /// The window was viewable when the window manager started.
    pub mapped: bool,
    /// Value of `_NET_WM_DESKTOP`, if present.
    pub desktop: Option<usize>,
}
