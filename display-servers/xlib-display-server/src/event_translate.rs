use crate::xwrap::{clean_mask, WITHDRAWN_STATE};
use crate::XlibWindowHandle;

use super::{event_translate_client_message, event_translate_property_notify, DisplayEvent, XWrap};
use deckwm_core::models::{WindowHandle, Xyhw};
use deckwm_core::utils::modmask_lookup::{Button, ModMask};
use std::os::raw::c_ulong;
use x11_dl::xlib;

pub struct XEvent<'a>(pub &'a mut XWrap, pub xlib::XEvent);

impl<'a> From<XEvent<'a>> for Option<DisplayEvent<XlibWindowHandle>> {
    fn from(x_event: XEvent) -> Self {
        let raw_event = x_event.1;
        let dragging = x_event.0.drag.is_some();

        match raw_event.get_type() {
            // A window asks to be shown.
            xlib::MapRequest => from_map_request(x_event),
            // A window showed itself without asking.
            xlib::MapNotify => from_map_notify(x_event),
            // Window is unmapped.
            xlib::UnmapNotify => from_unmap_event(x_event),
            // Window is destroyed.
            xlib::DestroyNotify => from_destroy_notify(x_event),
            // Window is taking focus.
            xlib::FocusIn => from_focus_in(x_event),
            // Window client message.
            xlib::ClientMessage => from_client_message(&x_event),
            // Window property notify.
            xlib::PropertyNotify if !dragging => from_property_notify(&x_event),
            // Window configure request.
            xlib::ConfigureRequest => Some(from_configure_request(raw_event)),
            // The root changed size.
            xlib::ConfigureNotify => from_configure_notify(&x_event),
            // Mouse entered notify.
            xlib::EnterNotify if !dragging => from_enter_notify(&x_event),
            // Mouse motion notify.
            xlib::MotionNotify if dragging => from_motion_notify(x_event),
            // Mouse button pressed.
            xlib::ButtonPress if !dragging => Some(from_button_press(raw_event)),
            // Mouse button released or any key ends a drag.
            xlib::ButtonRelease | xlib::KeyPress if dragging => Some(end_drag(x_event)),
            xlib::KeyPress => from_key_press(&x_event),
            xlib::MappingNotify => from_mapping_notify(x_event),
            _other => None,
        }
    }
}

fn from_map_request(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMapRequestEvent::from(x_event.1);
    let (info, _) = xw.window_info(event.window)?;
    Some(DisplayEvent::MapRequest(info))
}

fn from_map_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMapEvent::from(x_event.1);
    if event.override_redirect != 0 || xw.managed_windows.contains(&event.window) {
        return None;
    }
    // Only windows that declare a type are tracked.
    xw.get_window_type(event.window)?;
    let (info, _) = xw.window_info(event.window)?;
    Some(DisplayEvent::WindowMapped(info))
}

fn from_unmap_event(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XUnmapEvent::from(x_event.1);
    if event.send_event != xlib::False {
        // Set WM_STATE to withdrawn state.
        if xw.managed_windows.contains(&event.window) {
            xw.set_wm_states(event.window, &[WITHDRAWN_STATE]);
        }
        return None;
    }
    Some(DisplayEvent::WindowUnmap(WindowHandle(XlibWindowHandle(
        event.window,
    ))))
}

fn from_destroy_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XDestroyWindowEvent::from(x_event.1);
    xw.teardown_managed_window(event.window, true);
    Some(DisplayEvent::WindowDestroy(WindowHandle(XlibWindowHandle(
        event.window,
    ))))
}

fn from_focus_in(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XFocusChangeEvent::from(x_event.1);
    // Take the focus back from windows that grabbed it on their own.
    let focused = xw.focused_window;
    if focused != event.window && focused != xw.get_default_root() {
        let never_focus = xw
            .get_wmhints(focused)
            .is_some_and(|hint| hint.flags & xlib::InputHint != 0 && hint.input == 0);
        if never_focus {
            xw.take_focus(focused);
        } else {
            xw.focus(focused);
        }
    }
    None
}

fn from_client_message(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XClientMessageEvent::from(x_event.1);
    event_translate_client_message::from_event(x_event.0, &event)
}

fn from_property_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XPropertyEvent::from(x_event.1);
    event_translate_property_notify::from_event(x_event.0, &event)
}

fn from_configure_request(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XConfigureRequestEvent::from(raw_event);
    DisplayEvent::ConfigureRequest {
        handle: WindowHandle(XlibWindowHandle(event.window)),
        geometry: Xyhw::new(event.x, event.y, event.width, event.height),
        border_width: event.border_width,
    }
}

fn from_configure_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XConfigureEvent::from(x_event.1);
    if event.window != x_event.0.get_default_root() {
        return None;
    }
    Some(DisplayEvent::ScreenCreate(Xyhw::new(
        0,
        0,
        event.width,
        event.height,
    )))
}

fn from_enter_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XCrossingEvent::from(x_event.1);
    if event.mode != xlib::NotifyNormal
        || event.detail == xlib::NotifyInferior
        || event.window == x_event.0.get_default_root()
    {
        return None;
    }
    let h = WindowHandle(XlibWindowHandle(event.window));
    Some(DisplayEvent::PointerEnter(h))
}

fn from_motion_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMotionEvent::from(x_event.1);

    // Limit motion events to current refresh rate.
    if xw.refresh_rate as c_ulong > 0
        && event.time - xw.motion_event_limiter > (1000 / xw.refresh_rate as c_ulong)
    {
        xw.motion_event_limiter = event.time;
        return Some(DisplayEvent::Motion(event.x_root, event.y_root));
    }
    None
}

fn from_button_press(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XButtonPressedEvent::from(raw_event);
    let h = WindowHandle(XlibWindowHandle(event.window));
    DisplayEvent::MouseCombo(
        ModMask::from_bits_retain(clean_mask(event.state) as u16),
        Button::from_number(event.button),
        h,
        event.x_root,
        event.y_root,
    )
}

fn end_drag(x_event: XEvent) -> DisplayEvent<XlibWindowHandle> {
    x_event.0.set_drag(None);
    DisplayEvent::ChangeToNormalMode
}

fn from_key_press(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XKeyEvent::from(x_event.1);
    let command = x_event.0.command_for(event.state, event.keycode)?;
    tracing::trace!("Key {} runs {:?}", event.keycode, command);
    Some(DisplayEvent::SendCommand(command))
}

fn from_mapping_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let mut event = xlib::XMappingEvent::from(x_event.1);
    if let Err(err) = xw.refresh_keyboard(&mut event) {
        tracing::warn!("Keyboard mapping refresh failed: {}", err);
        return None;
    }
    if event.request == xlib::MappingKeyboard {
        xw.reset_grabs();
    }
    None
}
