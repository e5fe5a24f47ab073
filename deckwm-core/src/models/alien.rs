use super::{Handle, WindowHandle, WindowType, Xyhw};

/// A window that maps itself or asks not to be managed: docks, notifications, splash screens.
#[derive(Debug, Clone)]
pub struct Alien<H: Handle> {
    pub handle: WindowHandle<H>,
    pub r#type: WindowType,
    pub geometry: Xyhw,
    pub hidden: bool,
}

impl<H: Handle> Alien<H> {
    #[must_use]
    pub const fn new(handle: WindowHandle<H>, r#type: WindowType, geometry: Xyhw) -> Self {
        Self {
            handle,
            r#type,
            geometry,
            hidden: false,
        }
    }

    /// Notifications stay visible above a fullscreen client.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.r#type == WindowType::Notification
    }
}
