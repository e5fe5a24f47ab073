//! `XWrap` setters.
use crate::XWrap;
use std::ffi::CString;
use std::os::raw::{c_long, c_ulong};
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Appends a window property.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn append_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                xlib::PropModeAppend,
                data.as_ptr().cast::<u8>(),
                data.len() as i32,
            );
        }
    }

    /// Replaces a window property.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn replace_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                xlib::PropModeReplace,
                data.as_ptr().cast::<u8>(),
                data.len() as i32,
            );
        }
    }

    /// Sets the client list to the currently managed windows.
    pub fn set_client_list(&self) {
        let list: Vec<c_long> = self
            .managed_windows
            .iter()
            .map(|w| *w as c_long)
            .collect();
        self.replace_property_long(self.root, self.atoms.NetClientList, xlib::XA_WINDOW, &list);
    }

    /// Sets `_NET_CURRENT_DESKTOP`. Desktops are numbered from 0.
    pub fn set_current_desktop(&self, desktop: usize) {
        self.set_desktop_prop(&[desktop as u32], self.atoms.NetCurrentDesktop);
    }

    /// Sets a desktop property.
    // We allow the lossless cast here so that 32 bit systems may work.
    #[allow(clippy::cast_lossless)]
    pub fn set_desktop_prop(&self, data: &[u32], atom: c_ulong) {
        let x_data: Vec<c_long> = data.iter().map(|x| *x as c_long).collect();
        self.replace_property_long(self.root, atom, xlib::XA_CARDINAL, &x_data);
    }

    /// Sets a desktop property with type string.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    pub fn set_desktop_prop_string(&self, value: &str, atom: c_ulong, encoding: xlib::Atom) {
        if let Ok(cstring) = CString::new(value) {
            unsafe {
                (self.xlib.XChangeProperty)(
                    self.display,
                    self.root,
                    atom,
                    encoding,
                    8,
                    xlib::PropModeReplace,
                    cstring.as_ptr().cast::<u8>(),
                    value.len() as i32,
                );
            }
        }
    }

    /// Adds or removes one atom of a windows `_NET_WM_STATE`.
    pub fn set_state(&self, window: xlib::Window, toggle_to: bool, atom: xlib::Atom) {
        let mut states = self.get_window_states_atoms(window);
        if toggle_to {
            if states.contains(&atom) {
                return;
            }
            states.push(atom);
        } else {
            let Some(index) = states.iter().position(|s| s == &atom) else {
                return;
            };
            states.remove(index);
        }
        self.set_window_states_atoms(window, &states);
    }

    /// Sets a windows border color.
    // `XSetWindowBorder`: https://tronche.com/gui/x/xlib/window/XSetWindowBorder.html
    pub fn set_window_border_color(&self, window: xlib::Window, mut color: c_ulong) {
        // Force border opacity to 0xff.
        let mut bytes = color.to_le_bytes();
        bytes[3] = 0xff;
        color = c_ulong::from_le_bytes(bytes);
        unsafe { (self.xlib.XSetWindowBorder)(self.display, window, color) };
    }

    /// Sets a windows border width.
    // `XSetWindowBorderWidth`: https://tronche.com/gui/x/xlib/window/XSetWindowBorderWidth.html
    pub fn set_window_border_width(&self, window: xlib::Window, width: i32) {
        unsafe { (self.xlib.XSetWindowBorderWidth)(self.display, window, width.max(0) as u32) };
    }

    /// Sets a windows configuration.
    // `XConfigureWindow`: https://tronche.com/gui/x/xlib/window/XConfigureWindow.html
    pub fn set_window_config(
        &self,
        window: xlib::Window,
        mut window_changes: xlib::XWindowChanges,
        unlock: u32,
    ) {
        unsafe { (self.xlib.XConfigureWindow)(self.display, window, unlock, &mut window_changes) };
    }

    /// Sets `_NET_WM_DESKTOP` of a window.
    pub fn set_window_desktop(&self, window: xlib::Window, desktop: usize) {
        self.replace_property_long(
            window,
            self.atoms.NetWMDesktop,
            xlib::XA_CARDINAL,
            &[desktop as c_long],
        );
    }

    /// Sets the atom states of a window.
    pub fn set_window_states_atoms(&self, window: xlib::Window, states: &[xlib::Atom]) {
        let data: Vec<c_long> = states.iter().map(|x| *x as c_long).collect();
        self.replace_property_long(window, self.atoms.NetWMState, xlib::XA_ATOM, &data);
    }

    /// Sets the `WM_STATE` of a window.
    pub fn set_wm_states(&self, window: xlib::Window, states: &[c_long]) {
        self.replace_property_long(window, self.atoms.WMState, self.atoms.WMState, states);
    }
}
