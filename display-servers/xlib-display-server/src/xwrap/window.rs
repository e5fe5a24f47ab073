//! Xlib calls related to a window.
use super::{on_error_from_xlib, on_error_from_xlib_dummy, NORMAL_STATE, WITHDRAWN_STATE};
use crate::{XWrap, XlibWindowHandle};
use deckwm_core::models::{FocusDelivery, WindowHandle, WindowInfo, Xyhw};
use std::os::raw::c_long;
use x11_dl::xlib;

impl XWrap {
    /// Gathers what the core needs to know about a window. `None` for override-redirect windows
    /// and windows that are already gone.
    #[must_use]
    pub fn window_info(
        &self,
        window: xlib::Window,
    ) -> Option<(WindowInfo<XlibWindowHandle>, xlib::XWindowAttributes)> {
        let attrs = self.get_window_attrs(window).ok()?;
        if attrs.override_redirect != 0 {
            return None;
        }
        let handle = WindowHandle(XlibWindowHandle(window));
        let r#type = self.get_window_type(window).unwrap_or_default();
        let mut info = WindowInfo::new(handle, self.get_window_name(window), r#type);
        info.transient = self.get_transient_for(window).is_some();
        let states = self.get_window_states_atoms(window);
        info.fullscreen = states.contains(&self.atoms.NetWMStateFullscreen);
        info.hidden = states.contains(&self.atoms.NetWMStateHidden);
        if let Some(hint) = self.get_wmhints(window) {
            if hint.flags & xlib::InputHint != 0 && hint.input == 0 {
                info.focus = FocusDelivery::TakeFocus;
            }
        }
        info.geometry = Xyhw::new(attrs.x, attrs.y, attrs.width, attrs.height);
        Some((info, attrs))
    }

    /// Starts managing a window and maps it.
    // `XMapWindow`: https://tronche.com/gui/x/xlib/window/XMapWindow.html
    pub fn setup_managed_window(&mut self, window: xlib::Window) {
        if !self.managed_windows.contains(&window) {
            self.subscribe_to_window_events(window);
            self.managed_windows.push(window);
            self.append_property_long(
                self.root,
                self.atoms.NetClientList,
                xlib::XA_WINDOW,
                &[window as c_long],
            );
            self.grab_mouse_clicks(window, false);
        }
        unsafe { (self.xlib.XMapWindow)(self.display, window) };
        // Set WM_STATE to normal state to allow window sharing.
        self.set_wm_states(window, &[NORMAL_STATE]);
    }

    /// Teardown a managed window when it is unmapped or destroyed.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    pub fn teardown_managed_window(&mut self, window: xlib::Window, destroyed: bool) {
        if !self.managed_windows.contains(&window) {
            return;
        }
        self.managed_windows.retain(|x| *x != window);
        if !destroyed {
            unsafe {
                (self.xlib.XGrabServer)(self.display);
                (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
                self.ungrab_buttons(window);
                self.set_wm_states(window, &[WITHDRAWN_STATE]);
                self.sync();
                (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
                (self.xlib.XUngrabServer)(self.display);
            }
        }
        if self.focused_window == window {
            self.focused_window = self.root;
        }
        self.set_client_list();
    }

    /// Gives a window the input focus and marks it as the active window.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn focus(&mut self, window: xlib::Window) {
        self.hand_over_focus(window);
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                window,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
        }
        self.replace_property_long(
            self.root,
            self.atoms.NetActiveWindow,
            xlib::XA_WINDOW,
            &[window as c_long],
        );
    }

    /// Asks a window that refuses direct focus to take it.
    pub fn take_focus(&mut self, window: xlib::Window) {
        self.hand_over_focus(window);
        self.replace_property_long(
            self.root,
            self.atoms.NetActiveWindow,
            xlib::XA_WINDOW,
            &[window as c_long],
        );
        self.send_xevent_atom(window, self.atoms.WMTakeFocus);
    }

    /// Focuses the root and clears the active window.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn unfocus(&mut self) {
        let previous = self.focused_window;
        if previous != self.root && self.managed_windows.contains(&previous) {
            self.grab_mouse_clicks(previous, false);
        }
        self.focused_window = self.root;
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                self.root,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
        }
    }

    /// Moves the button grabs from the previously focused window to `window`.
    fn hand_over_focus(&mut self, window: xlib::Window) {
        let previous = self.focused_window;
        if previous != window && self.managed_windows.contains(&previous) {
            self.grab_mouse_clicks(previous, false);
        }
        self.focused_window = window;
        self.grab_mouse_clicks(window, true);
    }

    /// Applies a configure request and tells the window about it with a `ConfigureNotify`.
    pub fn configure_window(&self, window: xlib::Window, geometry: Xyhw, border_width: i32) {
        let changes = xlib::XWindowChanges {
            x: geometry.x,
            y: geometry.y,
            width: geometry.w.max(1),
            height: geometry.h.max(1),
            border_width,
            sibling: 0,    // Not unlocked.
            stack_mode: 0, // Not unlocked.
        };
        let unlock = xlib::CWX | xlib::CWY | xlib::CWWidth | xlib::CWHeight | xlib::CWBorderWidth;
        self.set_window_config(window, changes, u32::from(unlock));

        let mut configure_event: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        configure_event.type_ = xlib::ConfigureNotify;
        configure_event.display = self.display;
        configure_event.event = window;
        configure_event.window = window;
        configure_event.x = geometry.x;
        configure_event.y = geometry.y;
        configure_event.width = geometry.w.max(1);
        configure_event.height = geometry.h.max(1);
        configure_event.border_width = border_width;
        configure_event.above = 0;
        configure_event.override_redirect = 0;
        self.send_xevent(
            window,
            0,
            xlib::StructureNotifyMask,
            &mut configure_event.into(),
        );
    }

    // `XMoveWindow`: https://tronche.com/gui/x/xlib/window/XMoveWindow.html
    pub fn move_window(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe { (self.xlib.XMoveWindow)(self.display, window, x, y) };
    }

    // `XResizeWindow`: https://tronche.com/gui/x/xlib/window/XResizeWindow.html
    pub fn resize_window(&self, window: xlib::Window, w: i32, h: i32) {
        unsafe { (self.xlib.XResizeWindow)(self.display, window, w.max(1) as u32, h.max(1) as u32) };
    }

    // `XMoveResizeWindow`: https://tronche.com/gui/x/xlib/window/XMoveResizeWindow.html
    pub fn move_resize_window(&self, window: xlib::Window, geometry: Xyhw) {
        unsafe {
            (self.xlib.XMoveResizeWindow)(
                self.display,
                window,
                geometry.x,
                geometry.y,
                geometry.w.max(1) as u32,
                geometry.h.max(1) as u32,
            );
        }
    }

    /// Raise a window.
    // `XRaiseWindow`: https://tronche.com/gui/x/xlib/window/XRaiseWindow.html
    pub fn move_to_top(&self, window: xlib::Window) {
        unsafe { (self.xlib.XRaiseWindow)(self.display, window) };
    }

    // `XLowerWindow`: https://tronche.com/gui/x/xlib/window/XLowerWindow.html
    pub fn move_to_bottom(&self, window: xlib::Window) {
        unsafe { (self.xlib.XLowerWindow)(self.display, window) };
    }

    /// Kills a window.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XSetCloseDownMode`: https://tronche.com/gui/x/xlib/display/XSetCloseDownMode.html
    // `XKillClient`: https://tronche.com/gui/x/xlib/window-and-session-manager/XKillClient.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    pub fn kill_window(&self, window: xlib::Window) {
        // Nicely ask the window to close.
        if self.send_xevent_atom(window, self.atoms.WMDelete) {
            return;
        }
        tracing::debug!("{} ignores WM_DELETE_WINDOW, killing it", window);
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            (self.xlib.XSetCloseDownMode)(self.display, xlib::DestroyAll);
            (self.xlib.XKillClient)(self.display, window);
            self.sync();
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    /// Subscribe to an event of a window.
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    pub fn subscribe_to_event(&self, window: xlib::Window, mask: c_long) {
        unsafe { (self.xlib.XSelectInput)(self.display, window, mask) };
    }

    /// Subscribe to the wanted events of a window.
    pub fn subscribe_to_window_events(&self, window: xlib::Window) {
        let mask = xlib::EnterWindowMask | xlib::FocusChangeMask | xlib::PropertyChangeMask;
        self.subscribe_to_event(window, mask);
    }
}
