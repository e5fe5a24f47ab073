use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap};
use deckwm_core::models::WindowHandle;

use x11_dl::xlib;

/// Urgency hints and titles; every other property is left alone.
pub fn from_event(
    xw: &XWrap,
    event: &xlib::XPropertyEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if event.window == xw.get_default_root() || event.state == xlib::PropertyDelete {
        return None;
    }

    let handle = WindowHandle(XlibWindowHandle(event.window));
    match event.atom {
        xlib::XA_WM_HINTS => {
            let urgent = xw
                .get_wmhints(event.window)
                .is_some_and(|hints| hints.flags & xlib::XUrgencyHint != 0);
            Some(DisplayEvent::UrgencyChange(handle, urgent))
        }
        xlib::XA_WM_NAME => Some(update_title(xw, handle)),
        atom if atom == xw.atoms.NetWMName => Some(update_title(xw, handle)),
        _ => None,
    }
}

fn update_title(
    xw: &XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> DisplayEvent<XlibWindowHandle> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    DisplayEvent::TitleChange(handle, xw.get_window_name(window))
}
