//! Xlib backend of deckwm: turns X events into [`DisplayEvent`]s and carries out the
//! [`DisplayAction`]s the core emits.
// allow casting types
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod event_translate;
mod event_translate_client_message;
mod event_translate_property_notify;
mod xatom;
mod xcursor;
mod xwrap;

use serde::{Deserialize, Serialize};
pub use xwrap::{XWrap, XlibError};

use deckwm_core::config::Config;
use deckwm_core::models::{AdoptInfo, DragAxis, Handle, WindowHandle, WindowState, Xyhw};
use deckwm_core::{DisplayAction, DisplayEvent, DisplayServer};
use event_translate::XEvent;
use futures::prelude::*;
use std::pin::Pin;
use std::ptr;

use x11_dl::xlib;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XlibWindowHandle(xlib::Window);
impl Handle for XlibWindowHandle {}

pub struct XlibDisplayServer {
    xw: XWrap,
    initial_events: Vec<DisplayEvent<XlibWindowHandle>>,
}

impl DisplayServer<XlibWindowHandle> for XlibDisplayServer {
    fn new(config: &impl Config) -> Self {
        let mut wrap = XWrap::new();

        wrap.init(config); // setup events masks

        let mut instance = Self {
            xw: wrap,
            initial_events: Vec::new(),
        };
        instance.initial_events = instance.initial_events();
        instance
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = std::mem::take(&mut self.initial_events);

        let events_in_queue = self.xw.queue_len();
        for _ in 0..events_in_queue {
            let xlib_event = self.xw.get_next_event();
            let event = XEvent(&mut self.xw, xlib_event).into();
            if let Some(e) = event {
                tracing::trace!("DisplayEvent: {:?}", e);
                events.push(e);
            }
        }

        for event in &events {
            if let DisplayEvent::WindowUnmap(WindowHandle(XlibWindowHandle(w))) = event {
                self.xw.teardown_managed_window(*w, false);
            }
        }

        events
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<XlibWindowHandle>,
    ) -> Option<DisplayEvent<XlibWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        match act {
            DisplayAction::MoveWindow(WindowHandle(XlibWindowHandle(w)), x, y) => {
                xw.move_window(w, x, y);
            }
            DisplayAction::ResizeWindow(WindowHandle(XlibWindowHandle(w)), width, height) => {
                xw.resize_window(w, width, height);
            }
            DisplayAction::MoveResizeWindow(WindowHandle(XlibWindowHandle(w)), geometry) => {
                xw.move_resize_window(w, geometry);
            }
            DisplayAction::Raise(WindowHandle(XlibWindowHandle(w))) => xw.move_to_top(w),
            DisplayAction::Lower(WindowHandle(XlibWindowHandle(w))) => xw.move_to_bottom(w),
            DisplayAction::SetBorderWidth(WindowHandle(XlibWindowHandle(w)), width) => {
                xw.set_window_border_width(w, width);
            }
            DisplayAction::SetBorderColor(WindowHandle(XlibWindowHandle(w)), color) => {
                xw.set_window_border_color(w, xw.border_pixel(color));
            }
            DisplayAction::MapWindow(WindowHandle(XlibWindowHandle(w))) => {
                xw.setup_managed_window(w);
            }
            DisplayAction::ConfigureWindow {
                handle: WindowHandle(XlibWindowHandle(w)),
                geometry,
                border_width,
            } => xw.configure_window(w, geometry, border_width),
            DisplayAction::SetInputFocus(WindowHandle(XlibWindowHandle(w))) => xw.focus(w),
            DisplayAction::TakeFocus(WindowHandle(XlibWindowHandle(w))) => xw.take_focus(w),
            DisplayAction::ClearFocus => xw.unfocus(),
            DisplayAction::KillWindow(WindowHandle(XlibWindowHandle(w))) => xw.kill_window(w),
            DisplayAction::SetState(WindowHandle(XlibWindowHandle(w)), toggle_to, state) => {
                let atom = match state {
                    WindowState::Hidden => xw.atoms.NetWMStateHidden,
                    WindowState::Fullscreen => xw.atoms.NetWMStateFullscreen,
                };
                xw.set_state(w, toggle_to, atom);
            }
            DisplayAction::SetCurrentDesktop(desktop) => xw.set_current_desktop(desktop),
            DisplayAction::SetWindowDesktop(WindowHandle(XlibWindowHandle(w)), desktop) => {
                xw.set_window_desktop(w, desktop);
            }
            DisplayAction::ReadyToMoveWindow(_) => xw.set_drag(Some(DragAxis::Move)),
            DisplayAction::ReadyToResizeWindow(_) => xw.set_drag(Some(DragAxis::Resize)),
            DisplayAction::NormalMode => xw.set_drag(None),
            DisplayAction::ReplayClick(WindowHandle(XlibWindowHandle(w)), button) => {
                xw.replay_click(w, button.number());
            }
        }
        None
    }

    fn query_geometry(&self, handle: &WindowHandle<XlibWindowHandle>) -> Option<Xyhw> {
        let WindowHandle(XlibWindowHandle(window)) = handle;
        self.xw.get_window_geometry(*window).ok()
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        self.xw.flush();
    }
}

impl XlibDisplayServer {
    /// Opens and closes the display named by `$DISPLAY`, so a missing X server is reported
    /// before the window manager starts.
    /// # Errors
    ///
    /// Errors when libX11 cannot be loaded or the display cannot be opened.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XCloseDisplay`: https://tronche.com/gui/x/xlib/display/XCloseDisplay.html
    pub fn check_connection() -> Result<(), XlibError> {
        let xlib = xlib::Xlib::open().map_err(|err| XlibError::LibraryMissing(err.to_string()))?;
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(XlibError::DisplayUnavailable);
        }
        unsafe { (xlib.XCloseDisplay)(display) };
        Ok(())
    }

    /// Return a vec of events for setting up state of WM.
    fn initial_events(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = vec![];
        match self.xw.get_screen_geometry() {
            Ok(screen) => events.push(DisplayEvent::ScreenCreate(screen)),
            Err(err) => tracing::error!("Cannot read the screen size: {}", err),
        }

        // Tell manager about existing windows.
        events.append(&mut self.find_all_windows());
        events
    }

    fn find_all_windows(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let handles = match self.xw.get_all_windows() {
            Ok(handles) => handles,
            Err(err) => {
                tracing::error!("Cannot list the existing windows: {}", err);
                return vec![];
            }
        };
        handles
            .into_iter()
            .filter_map(|window| {
                let (info, attrs) = self.xw.window_info(window)?;
                // Iconified windows are unmapped but still belong to a desktop.
                let iconic = self.xw.get_wm_state(window) == Some(xwrap::ICONIC_STATE);
                let adopt = AdoptInfo {
                    mapped: attrs.map_state == xlib::IsViewable || iconic,
                    desktop: self.xw.get_window_desktop(window),
                };
                Some(DisplayEvent::Adopt(info, adopt))
            })
            .collect()
    }
}
