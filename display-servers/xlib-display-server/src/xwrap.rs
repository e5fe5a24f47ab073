//! A wrapper around calls to xlib and X related functions.
// We allow this _ because if we don't we'll receive an error that it isn't read on _task_guard.
#![allow(clippy::used_underscore_binding)]
// We allow this so that extern "C" functions are not flagged as confusing. The current placement
// allows for easy reading.
#![allow(clippy::items_after_statements)]
use super::xatom::XAtom;
use super::xcursor::XCursor;
use deckwm_core::config::Config;
use deckwm_core::models::DragAxis;
use deckwm_core::utils::modmask_lookup;
use deckwm_core::{BorderColor, Command};
use std::os::raw::{c_double, c_int, c_long, c_short, c_uint, c_ulong};
use std::sync::Arc;
use std::{ptr, slice};
use thiserror::Error;
use tokio::sync::{oneshot, Notify};
use tokio::time::Duration;

use x11_dl::xlib;
use x11_dl::xrandr::Xrandr;

mod getters;
mod keyboard;
mod mouse;
mod setters;
mod window;

pub use keyboard::clean_mask;

type WindowStateConst = c_long;
pub const WITHDRAWN_STATE: WindowStateConst = 0;
pub const NORMAL_STATE: WindowStateConst = 1;
pub const ICONIC_STATE: WindowStateConst = 2;
const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::ButtonPressMask
    | xlib::PointerMotionMask
    | xlib::PropertyChangeMask
    | xlib::StructureNotifyMask;

const BUTTONMASK: c_long = xlib::ButtonPressMask | xlib::ButtonReleaseMask | xlib::ButtonMotionMask;
const MOUSEMASK: c_long = BUTTONMASK | xlib::PointerMotionMask;

const X_CONFIGUREWINDOW: u8 = 12;
const X_GRABBUTTON: u8 = 28;
const X_GRABKEY: u8 = 33;
const X_SETINPUTFOCUS: u8 = 42;
const X_COPYAREA: u8 = 62;
const X_POLYSEGMENT: u8 = 66;
const X_POLYFILLRECTANGLE: u8 = 70;
const X_POLYTEXT8: u8 = 74;

// This is allowed for now as const extern fns
// are not yet stable (1.56.0, 16 Sept 2021)
// see issue #64926 <https://github.com/rust-lang/rust/issues/64926> for more information.
#[allow(clippy::missing_const_for_fn)]
pub extern "C" fn on_error_from_xlib(_: *mut xlib::Display, er: *mut xlib::XErrorEvent) -> c_int {
    let err = unsafe { *er };
    let ec = err.error_code;
    let rc = err.request_code;
    let ba = ec == xlib::BadAccess;
    let bd = ec == xlib::BadDrawable;
    let bm = ec == xlib::BadMatch;

    if ec == xlib::BadWindow
        || (rc == X_CONFIGUREWINDOW && bm)
        || (rc == X_GRABBUTTON && ba)
        || (rc == X_GRABKEY && ba)
        || (rc == X_SETINPUTFOCUS && bm)
        || (rc == X_COPYAREA && bd)
        || (rc == X_POLYSEGMENT && bd)
        || (rc == X_POLYFILLRECTANGLE && bd)
        || (rc == X_POLYTEXT8 && bd)
    {
        return 0;
    }
    tracing::warn!("X error {} on request {}", ec, rc);
    1
}

pub extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    1
}

/// Allocated pixels of the border palette.
pub struct Colors {
    focused: c_ulong,
    unfocused: c_ulong,
    scratchpad: c_ulong,
}

impl Colors {
    pub const fn pixel(&self, color: BorderColor) -> c_ulong {
        match color {
            BorderColor::Focused => self.focused,
            BorderColor::Unfocused => self.unfocused,
            BorderColor::Scratchpad => self.scratchpad,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum XlibError {
    #[error("libX11 could not be loaded: {0}")]
    LibraryMissing(String),
    #[error("cannot open the X display")]
    DisplayUnavailable,
    #[error("Xlib returned a failed status")]
    FailedStatus,
    #[error("invalid atom")]
    InvalidXAtom,
}

/// A key grab and the command it runs.
pub struct KeyGrab {
    pub mask: c_uint,
    pub keysym: xlib::KeySym,
    pub command: Command,
}

/// Contains Xserver information and origins.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    root: xlib::Window,
    pub atoms: XAtom,
    cursors: XCursor,
    colors: Colors,
    pub managed_windows: Vec<xlib::Window>,
    pub focused_window: xlib::Window,
    /// Set while a pointer drag owns the pointer.
    pub drag: Option<DragAxis>,
    pub click_to_focus: bool,
    pub mouse_key_mask: c_uint,
    keygrabs: Vec<KeyGrab>,
    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
    pub motion_event_limiter: c_ulong,
    pub refresh_rate: c_short,
}

impl XWrap {
    /// Opens the display named by `$DISPLAY` and takes over the root window.
    ///
    /// # Panics
    ///
    /// Panics if unable to contact xorg. Run [`crate::XlibDisplayServer::check_connection`]
    /// first to report that as an error instead.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XConnectionNumber`: https://tronche.com/gui/x/xlib/display/display-macros.html#ConnectionNumber
    // `XDefaultRootWindow`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultRootWindow
    // `XSetErrorHandler`: https://tronche.com/gui/x/xlib/event-handling/protocol-errors/XSetErrorHandler.html
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    #[must_use]
    pub fn new() -> Self {
        const SERVER: mio::Token = mio::Token(0);
        let xlib = xlib::Xlib::open().expect("Couldn't not connect to Xorg Server");
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        assert!(!display.is_null(), "Null pointer in display");

        let fd = unsafe { (xlib.XConnectionNumber)(display) };

        let (guard, _task_guard) = oneshot::channel();
        let notify = Arc::new(Notify::new());
        let task_notify = notify.clone();

        let mut poll = mio::Poll::new().expect("Unable to boot Mio");
        let mut events = mio::Events::with_capacity(1);
        poll.registry()
            .register(
                &mut mio::unix::SourceFd(&fd),
                SERVER,
                mio::Interest::READABLE,
            )
            .expect("Unable to boot Mio");
        let timeout = Duration::from_millis(100);
        tokio::task::spawn_blocking(move || loop {
            if guard.is_closed() {
                return;
            }

            if let Err(err) = poll.poll(&mut events, Some(timeout)) {
                tracing::warn!("Xlib socket poll failed with {:?}", err);
                continue;
            }

            events
                .iter()
                .filter(|event| SERVER == event.token())
                .for_each(|_| notify.notify_one());
        });

        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);
        let root = unsafe { (xlib.XDefaultRootWindow)(display) };
        let refresh_rate = refresh_rate(display, root);
        tracing::debug!("Refresh Rate: {}", refresh_rate);

        let xw = Self {
            xlib,
            display,
            root,
            atoms,
            cursors,
            colors: Colors {
                focused: 0,
                unfocused: 0,
                scratchpad: 0,
            },
            managed_windows: vec![],
            focused_window: root,
            drag: None,
            click_to_focus: true,
            mouse_key_mask: 0,
            keygrabs: vec![],
            _task_guard,
            task_notify,
            motion_event_limiter: 0,
            refresh_rate,
        };

        // Check that another WM is not running.
        extern "C" fn startup_check_for_other_wm(
            _: *mut xlib::Display,
            _: *mut xlib::XErrorEvent,
        ) -> c_int {
            tracing::error!("Another window manager is already running");
            ::std::process::exit(1);
        }
        unsafe {
            (xw.xlib.XSetErrorHandler)(Some(startup_check_for_other_wm));
            (xw.xlib.XSelectInput)(xw.display, root, xlib::SubstructureRedirectMask);
        };
        xw.sync();

        unsafe { (xw.xlib.XSetErrorHandler)(Some(on_error_from_xlib)) };
        xw.sync();
        xw
    }

    /// Reads the settings the adapter acts on, then selects the root events, grabs the keys and
    /// publishes the EWMH hints.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    pub fn init(&mut self, config: &impl Config) {
        self.click_to_focus = config.click_to_focus();
        self.mouse_key_mask = c_uint::from(modmask_lookup::into_modmask(&config.mousekey()).bits());
        self.colors = Colors {
            focused: self.get_color(&config.focus_color()),
            unfocused: self.get_color(&config.unfocus_color()),
            scratchpad: self.get_color(&config.scratchpad_color()),
        };

        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.cursor = self.cursors.normal;
        attrs.event_mask = ROOT_EVENT_MASK;
        unsafe {
            (self.xlib.XChangeWindowAttributes)(
                self.display,
                self.root,
                xlib::CWEventMask | xlib::CWCursor,
                &mut attrs,
            );
        }
        self.subscribe_to_event(self.root, ROOT_EVENT_MASK);

        self.keygrabs = config
            .keybinds()
            .into_iter()
            .filter_map(|keybind| {
                let Some(keysym) = self.into_keysym(&keybind.key) else {
                    tracing::warn!("Unknown key `{}`, binding skipped", keybind.key);
                    return None;
                };
                Some(KeyGrab {
                    mask: c_uint::from(modmask_lookup::into_modmask(&keybind.modifier).bits()),
                    keysym,
                    command: keybind.command,
                })
            })
            .collect();
        self.reset_grabs();

        // EWMH compliance.
        let supported: Vec<c_long> = self
            .atoms
            .net_supported()
            .iter()
            .map(|&atom| atom as c_long)
            .collect();
        self.replace_property_long(self.root, self.atoms.NetSupported, xlib::XA_ATOM, &supported);
        unsafe { (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList) };
        self.init_desktops_hints(config.desktops(), config.default_desktop());

        self.sync();
    }

    /// EWMH support used by pagers and bars.
    pub fn init_desktops_hints(&self, desktops: usize, current: usize) {
        self.set_desktop_prop(&[desktops as u32], self.atoms.NetNumberOfDesktops);
        self.set_current_desktop(current);
        self.set_desktop_prop_string("deckwm", self.atoms.NetWMName, self.atoms.UTF8String);
        self.replace_property_long(
            self.root,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &[self.root as c_long],
        );
    }

    /// Send a xevent atom for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    fn send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        if self.can_send_xevent_atom(window, atom) {
            let mut msg: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
            msg.type_ = xlib::ClientMessage;
            msg.window = window;
            msg.message_type = self.atoms.WMProtocols;
            msg.format = 32;
            msg.data.set_long(0, atom as c_long);
            msg.data.set_long(1, xlib::CurrentTime as c_long);
            let mut ev: xlib::XEvent = msg.into();
            self.send_xevent(window, 0, xlib::NoEventMask, &mut ev);
            return true;
        }
        false
    }

    /// Send a xevent for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    pub fn send_xevent(
        &self,
        window: xlib::Window,
        propogate: i32,
        mask: c_long,
        event: &mut xlib::XEvent,
    ) {
        unsafe { (self.xlib.XSendEvent)(self.display, window, propogate, mask, event) };
        self.sync();
    }

    /// Returns whether a window can recieve a xevent atom.
    // `XGetWMProtocols`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMProtocols.html
    fn can_send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        unsafe {
            let mut array: *mut xlib::Atom = ptr::null_mut();
            let mut length: c_int = 0;
            let status: xlib::Status =
                (self.xlib.XGetWMProtocols)(self.display, window, &mut array, &mut length);
            if status == 0 || array.is_null() {
                return false;
            }
            let found = slice::from_raw_parts(array, length as usize).contains(&atom);
            (self.xlib.XFree)(array.cast());
            found
        }
    }

    /// Grabs the pointer for a drag, or releases it with `None`.
    pub fn set_drag(&mut self, drag: Option<DragAxis>) {
        match drag {
            Some(axis) if self.drag.is_none() => {
                self.grab_pointer(self.cursors.for_drag(axis));
                self.drag = Some(axis);
            }
            Some(_) => {}
            None => {
                self.ungrab_pointer();
                self.drag = None;
            }
        }
    }

    pub const fn border_pixel(&self, color: BorderColor) -> c_ulong {
        self.colors.pixel(color)
    }

    /// Flush and sync the xserver.
    // `XSync`: https://tronche.com/gui/x/xlib/event-handling/XSync.html
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }

    /// Returns how many events are waiting.
    // `XPending`: https://tronche.com/gui/x/xlib/event-handling/XPending.html
    #[must_use]
    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }
}

impl Default for XWrap {
    fn default() -> Self {
        Self::new()
    }
}

/// The highest refresh rate of the active CRTCs, 60 without xrandr.
fn refresh_rate(display: *mut xlib::Display, root: xlib::Window) -> c_short {
    let Ok(xrandr) = Xrandr::open() else {
        return 60;
    };
    unsafe {
        let screen_resources = (xrandr.XRRGetScreenResources)(display, root);
        if screen_resources.is_null() {
            return 60;
        }
        let crtcs = slice::from_raw_parts(
            (*screen_resources).crtcs,
            (*screen_resources).ncrtc as usize,
        );
        let active_modes: Vec<c_ulong> = crtcs
            .iter()
            .map(|crtc| (xrandr.XRRGetCrtcInfo)(display, screen_resources, *crtc))
            .filter(|&crtc_info| !crtc_info.is_null() && (*crtc_info).mode != 0)
            .map(|crtc_info| (*crtc_info).mode)
            .collect();
        let modes = slice::from_raw_parts(
            (*screen_resources).modes,
            (*screen_resources).nmode as usize,
        );
        modes
            .iter()
            .filter(|mode_info| active_modes.contains(&mode_info.id))
            .map(|mode_info| {
                (mode_info.dotClock as c_double
                    / c_double::from(mode_info.hTotal * mode_info.vTotal))
                    as c_short
            })
            .max()
            .unwrap_or(60)
    }
}
