use super::{Button, ModMask};
use crate::models::{AdoptInfo, Handle, WindowHandle, WindowInfo, Xyhw};
use crate::Command;

/// `_NET_WM_STATE` change requested through a client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Remove,
    Add,
    Toggle,
}

impl StateAction {
    /// The new value of a flag currently set to `current`.
    #[must_use]
    pub const fn apply(self, current: bool) -> bool {
        match self {
            Self::Remove => false,
            Self::Add => true,
            Self::Toggle => !current,
        }
    }
}

/// The client messages the window manager answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Fullscreen(StateAction),
    Hidden(StateAction),
    CurrentDesktop(usize),
    Close,
    ActiveWindow,
    WindowDesktop(usize),
}

#[derive(Debug)]
pub enum DisplayEvent<H: Handle> {
    ScreenCreate(Xyhw),
    MapRequest(WindowInfo<H>),
    /// A window mapped itself without asking.
    WindowMapped(WindowInfo<H>),
    /// A window that existed before the window manager started.
    Adopt(WindowInfo<H>, AdoptInfo),
    WindowDestroy(WindowHandle<H>),
    WindowUnmap(WindowHandle<H>),
    ConfigureRequest {
        handle: WindowHandle<H>,
        geometry: Xyhw,
        border_width: i32,
    },
    UrgencyChange(WindowHandle<H>, bool),
    TitleChange(WindowHandle<H>, Option<String>),
    PointerEnter(WindowHandle<H>),
    MouseCombo(ModMask, Button, WindowHandle<H>, i32, i32),
    Motion(i32, i32),
    ClientMessage(WindowHandle<H>, ClientMessage),
    SendCommand(Command),
    ChangeToNormalMode,
}
