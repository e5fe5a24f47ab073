use crate::models::Handle;
use crate::models::WindowHandle;
use crate::models::WindowState;
use crate::models::Xyhw;
use crate::utils::modmask_lookup::Button;
use serde::{Deserialize, Serialize};

/// Border palette entries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderColor {
    Focused,
    Unfocused,
    Scratchpad,
}

/// These are responses from the Window manager.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction<H: Handle> {
    /// Move a window without touching its size.
    #[serde(bound = "")]
    MoveWindow(WindowHandle<H>, i32, i32),

    /// Resize a window in place.
    #[serde(bound = "")]
    ResizeWindow(WindowHandle<H>, i32, i32),

    #[serde(bound = "")]
    MoveResizeWindow(WindowHandle<H>, Xyhw),

    #[serde(bound = "")]
    Raise(WindowHandle<H>),

    #[serde(bound = "")]
    Lower(WindowHandle<H>),

    #[serde(bound = "")]
    SetBorderWidth(WindowHandle<H>, i32),

    #[serde(bound = "")]
    SetBorderColor(WindowHandle<H>, BorderColor),

    #[serde(bound = "")]
    MapWindow(WindowHandle<H>),

    /// Forward a configure request, adjusted by the window manager.
    #[serde(bound = "")]
    ConfigureWindow {
        handle: WindowHandle<H>,
        geometry: Xyhw,
        border_width: i32,
    },

    /// Give the window input focus and mark it as the active window.
    #[serde(bound = "")]
    SetInputFocus(WindowHandle<H>),

    /// Send `WM_TAKE_FOCUS` to a window that does not take focus directly.
    #[serde(bound = "")]
    TakeFocus(WindowHandle<H>),

    /// Focus the root window and clear the active window hint.
    ClearFocus,

    /// Nicely ask a window if it would please close at its convenience, kill it otherwise.
    #[serde(bound = "")]
    KillWindow(WindowHandle<H>),

    /// Change a windows state.
    #[serde(bound = "")]
    SetState(WindowHandle<H>, bool, WindowState),

    SetCurrentDesktop(usize),

    #[serde(bound = "")]
    SetWindowDesktop(WindowHandle<H>, usize),

    /// Tell the DM we are ready to move this window.
    #[serde(bound = "")]
    ReadyToMoveWindow(WindowHandle<H>),

    /// Tell the DM we are ready to resize this window.
    #[serde(bound = "")]
    ReadyToResizeWindow(WindowHandle<H>),

    /// Tell the DM to return to normal mode if it is not (ie resize a
    /// window or moving a window).
    NormalMode,

    #[serde(bound = "")]
    ReplayClick(WindowHandle<H>, Button),
}
