//! `XWrap` getters.
use super::{XlibError, MAX_PROPERTY_VALUE_LEN};
use crate::XWrap;
use deckwm_core::models::{WindowType, Xyhw};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::{ptr, slice};
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Returns the child windows of the root, bottom to top.
    /// # Errors
    ///
    /// Will error if the tree of the root cannot be queried.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    pub fn get_all_windows(&self) -> Result<Vec<xlib::Window>, XlibError> {
        unsafe {
            let mut root_return: xlib::Window = 0;
            let mut parent_return: xlib::Window = 0;
            let mut array: *mut xlib::Window = ptr::null_mut();
            let mut length: c_uint = 0;
            let status: xlib::Status = (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut root_return,
                &mut parent_return,
                &mut array,
                &mut length,
            );
            if status == 0 {
                return Err(XlibError::FailedStatus);
            }
            if array.is_null() {
                return Ok(vec![]);
            }
            let windows = slice::from_raw_parts(array, length as usize).to_vec();
            (self.xlib.XFree)(array.cast());
            Ok(windows)
        }
    }

    /// Returns the pixel of a named or `#rrggbb` color.
    // `XDefaultScreen`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultScreen
    // `XDefaultColormap`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultColormap
    // `XAllocNamedColor`: https://tronche.com/gui/x/xlib/color/XAllocNamedColor.html
    #[must_use]
    pub fn get_color(&self, color: &str) -> c_ulong {
        let Ok(name) = CString::new(color) else {
            return 0;
        };
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let cmap: xlib::Colormap = (self.xlib.XDefaultColormap)(self.display, screen);
            let mut exact: xlib::XColor = std::mem::zeroed();
            let mut color: xlib::XColor = std::mem::zeroed();
            if (self.xlib.XAllocNamedColor)(self.display, cmap, name.as_ptr(), &mut color, &mut exact)
                == 0
            {
                tracing::warn!("Cannot allocate color {:?}", name);
            }
            color.pixel
        }
    }

    /// Returns the default root.
    #[must_use]
    pub const fn get_default_root(&self) -> xlib::Window {
        self.root
    }

    /// Returns the next `Xevent` of the xserver.
    // `XNextEvent`: https://tronche.com/gui/x/xlib/event-handling/manipulating-event-queue/XNextEvent.html
    #[must_use]
    pub fn get_next_event(&self) -> xlib::XEvent {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            (self.xlib.XNextEvent)(self.display, &mut event);
            event
        }
    }

    /// Size of the root window.
    /// # Errors
    ///
    /// Will error if the attributes of the root cannot be read.
    pub fn get_screen_geometry(&self) -> Result<Xyhw, XlibError> {
        let attrs = self.get_window_attrs(self.root)?;
        Ok(Xyhw::new(0, 0, attrs.width, attrs.height))
    }

    /// Returns the transient parent of a window.
    // `XGetTransientForHint`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTransientForHint.html
    #[must_use]
    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        let mut transient: xlib::Window = 0;
        let status: c_int =
            unsafe { (self.xlib.XGetTransientForHint)(self.display, window, &mut transient) };
        (status > 0).then_some(transient)
    }

    /// Returns the attributes of a window.
    /// # Errors
    ///
    /// Will error if window status is 0 (no attributes).
    // `XGetWindowAttributes`: https://tronche.com/gui/x/xlib/window-information/XGetWindowAttributes.html
    pub fn get_window_attrs(
        &self,
        window: xlib::Window,
    ) -> Result<xlib::XWindowAttributes, XlibError> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(attrs)
    }

    /// Returns the geometry of a window, borders excluded.
    /// # Errors
    ///
    /// Errors if Xlib returns a status of 0.
    // `XGetGeometry`: https://tronche.com/gui/x/xlib/window-information/XGetGeometry.html
    pub fn get_window_geometry(&self, window: xlib::Window) -> Result<Xyhw, XlibError> {
        let mut root_return: xlib::Window = 0;
        let mut x_return: c_int = 0;
        let mut y_return: c_int = 0;
        let mut width_return: c_uint = 0;
        let mut height_return: c_uint = 0;
        let mut border_width_return: c_uint = 0;
        let mut depth_return: c_uint = 0;
        let status = unsafe {
            (self.xlib.XGetGeometry)(
                self.display,
                window,
                &mut root_return,
                &mut x_return,
                &mut y_return,
                &mut width_return,
                &mut height_return,
                &mut border_width_return,
                &mut depth_return,
            )
        };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(Xyhw::new(
            x_return,
            y_return,
            width_return as i32,
            height_return as i32,
        ))
    }

    /// Returns a windows name, `_NET_WM_NAME` before `WM_NAME`.
    #[must_use]
    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        self.get_text_prop(window, self.atoms.NetWMName)
            .or_else(|_| self.get_text_prop(window, xlib::XA_WM_NAME))
            .ok()
    }

    /// Returns the `_NET_WM_DESKTOP` of a window.
    #[must_use]
    pub fn get_window_desktop(&self, window: xlib::Window) -> Option<usize> {
        let values = self.get_property_longs(window, self.atoms.NetWMDesktop, xlib::XA_CARDINAL);
        values
            .first()
            .and_then(|desktop| usize::try_from(*desktop).ok())
    }

    /// Returns the atom states of a window.
    #[must_use]
    pub fn get_window_states_atoms(&self, window: xlib::Window) -> Vec<xlib::Atom> {
        self.get_property_longs(window, self.atoms.NetWMState, xlib::XA_ATOM)
            .into_iter()
            .map(|atom| atom as xlib::Atom)
            .collect()
    }

    /// Returns the type of a window, `None` when `_NET_WM_WINDOW_TYPE` is not set.
    #[must_use]
    pub fn get_window_type(&self, window: xlib::Window) -> Option<WindowType> {
        let atom = *self
            .get_property_longs(window, self.atoms.NetWMWindowType, xlib::XA_ATOM)
            .first()? as xlib::Atom;
        let r#type = match atom {
            x if x == self.atoms.NetWMWindowTypeDesktop => WindowType::Desktop,
            x if x == self.atoms.NetWMWindowTypeDock => WindowType::Dock,
            x if x == self.atoms.NetWMWindowTypeToolbar => WindowType::Toolbar,
            x if x == self.atoms.NetWMWindowTypeMenu => WindowType::Menu,
            x if x == self.atoms.NetWMWindowTypeUtility => WindowType::Utility,
            x if x == self.atoms.NetWMWindowTypeSplash => WindowType::Splash,
            x if x == self.atoms.NetWMWindowTypeDialog => WindowType::Dialog,
            x if x == self.atoms.NetWMWindowTypeNotification => WindowType::Notification,
            x if x == self.atoms.NetWMWindowTypeTooltip => WindowType::Tooltip,
            _ => WindowType::Normal,
        };
        Some(r#type)
    }

    /// Returns the `WM_HINTS` of a window.
    // `XGetWMHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMHints.html
    #[must_use]
    pub fn get_wmhints(&self, window: xlib::Window) -> Option<xlib::XWMHints> {
        unsafe {
            let hints_ptr: *mut xlib::XWMHints = (self.xlib.XGetWMHints)(self.display, window);
            if hints_ptr.is_null() {
                return None;
            }
            let hints: xlib::XWMHints = *hints_ptr;
            (self.xlib.XFree)(hints_ptr.cast());
            Some(hints)
        }
    }

    /// Returns the `WM_STATE` of a window.
    #[must_use]
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<c_long> {
        self.get_property_longs(window, self.atoms.WMState, self.atoms.WMState)
            .first()
            .copied()
    }

    /// Returns the name of a `XAtom`.
    /// # Errors
    ///
    /// Errors if `XAtom` is not valid.
    // `XGetAtomName`: https://tronche.com/gui/x/xlib/window-information/XGetAtomName.html
    pub fn get_xatom_name(&self, atom: xlib::Atom) -> Result<String, XlibError> {
        unsafe {
            let name = (self.xlib.XGetAtomName)(self.display, atom);
            if name.is_null() {
                return Err(XlibError::InvalidXAtom);
            }
            let value = CStr::from_ptr(name).to_string_lossy().into_owned();
            (self.xlib.XFree)(name.cast());
            Ok(value)
        }
    }

    // Internal functions.

    /// Returns a 32 bit format property as a list, empty when absent.
    // `XGetWindowProperty`: https://tronche.com/gui/x/xlib/window-information/XGetWindowProperty.html
    fn get_property_longs(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Vec<c_long> {
        let mut format_return: i32 = 0;
        let mut nitems_return: c_ulong = 0;
        let mut type_return: xlib::Atom = 0;
        let mut bytes_after_return: c_ulong = 0;
        let mut prop_return: *mut c_uchar = ptr::null_mut();
        unsafe {
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut type_return,
                &mut format_return,
                &mut nitems_return,
                &mut bytes_after_return,
                &mut prop_return,
            );
            if status != i32::from(xlib::Success) || prop_return.is_null() {
                return vec![];
            }
            // Xlib hands 32 bit items back as longs.
            #[allow(clippy::cast_ptr_alignment)]
            let values = if format_return == 32 {
                slice::from_raw_parts(prop_return.cast::<c_long>(), nitems_return as usize)
                    .to_vec()
            } else {
                vec![]
            };
            (self.xlib.XFree)(prop_return.cast());
            values
        }
    }

    /// Returns a text property for a window.
    /// # Errors
    ///
    /// Errors if the property is missing.
    // `XGetTextProperty`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTextProperty.html
    fn get_text_prop(&self, window: xlib::Window, atom: xlib::Atom) -> Result<String, XlibError> {
        unsafe {
            let mut text_prop: xlib::XTextProperty = std::mem::zeroed();
            let status: c_int =
                (self.xlib.XGetTextProperty)(self.display, window, &mut text_prop, atom);
            if status == 0 || text_prop.value.is_null() {
                return Err(XlibError::FailedStatus);
            }
            let text = CStr::from_ptr(text_prop.value.cast::<c_char>())
                .to_string_lossy()
                .into_owned();
            (self.xlib.XFree)(text_prop.value.cast());
            Ok(text)
        }
    }
}
