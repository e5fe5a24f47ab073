use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap};
use deckwm_core::models::WindowHandle;
use deckwm_core::{ClientMessage, StateAction};
use std::os::raw::c_long;

use x11_dl::xlib;

/// `_NET_WM_STATE` actions are sent as 0 remove, 1 add, 2 toggle.
pub fn state_action(value: c_long) -> Option<StateAction> {
    match value {
        0 => Some(StateAction::Remove),
        1 => Some(StateAction::Add),
        2 => Some(StateAction::Toggle),
        _ => None,
    }
}

pub fn from_event(
    xw: &XWrap,
    event: &xlib::XClientMessageEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if tracing::enabled!(tracing::Level::TRACE) {
        let atom_name = xw.get_xatom_name(event.message_type);
        tracing::trace!("ClientMessage: {} : {:?}", event.window, atom_name);
    }
    let handle = WindowHandle(XlibWindowHandle(event.window));
    let atoms = &xw.atoms;
    let message = if event.message_type == atoms.NetWMState {
        let action = state_action(event.data.get_long(0))?;
        let names_state = |state: xlib::Atom| {
            event.data.get_long(1) == state as c_long || event.data.get_long(2) == state as c_long
        };
        if names_state(atoms.NetWMStateFullscreen) {
            ClientMessage::Fullscreen(action)
        } else if names_state(atoms.NetWMStateHidden) {
            ClientMessage::Hidden(action)
        } else {
            return None;
        }
    } else if event.message_type == atoms.NetCurrentDesktop {
        ClientMessage::CurrentDesktop(desktop_index(event.data.get_long(0))?)
    } else if event.message_type == atoms.NetWMDesktop {
        ClientMessage::WindowDesktop(desktop_index(event.data.get_long(0))?)
    } else if event.message_type == atoms.NetCloseWindow {
        ClientMessage::Close
    } else if event.message_type == atoms.NetActiveWindow {
        ClientMessage::ActiveWindow
    } else {
        return None;
    };
    Some(DisplayEvent::ClientMessage(handle, message))
}

fn desktop_index(value: c_long) -> Option<usize> {
    usize::try_from(value)
        .map_err(|err| {
            tracing::debug!("Received invalid desktop index ({}): {}", value, err);
        })
        .ok()
}
