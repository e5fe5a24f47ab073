use std::ffi::CString;
use x11_dl::xlib;

#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub struct XAtom {
    pub WMProtocols: xlib::Atom,
    pub WMDelete: xlib::Atom,
    pub WMState: xlib::Atom,
    pub WMTakeFocus: xlib::Atom,
    pub UTF8String: xlib::Atom,
    pub NetActiveWindow: xlib::Atom,
    pub NetSupported: xlib::Atom,
    pub NetSupportingWmCheck: xlib::Atom,
    pub NetWMName: xlib::Atom,
    pub NetWMState: xlib::Atom,
    pub NetWMStateFullscreen: xlib::Atom,
    pub NetWMStateHidden: xlib::Atom,
    pub NetWMWindowType: xlib::Atom,
    pub NetWMWindowTypeDesktop: xlib::Atom,
    pub NetWMWindowTypeDock: xlib::Atom,
    pub NetWMWindowTypeToolbar: xlib::Atom,
    pub NetWMWindowTypeMenu: xlib::Atom,
    pub NetWMWindowTypeUtility: xlib::Atom,
    pub NetWMWindowTypeSplash: xlib::Atom,
    pub NetWMWindowTypeDialog: xlib::Atom,
    pub NetWMWindowTypeNotification: xlib::Atom,
    pub NetWMWindowTypeTooltip: xlib::Atom,
    pub NetWMDesktop: xlib::Atom,
    pub NetClientList: xlib::Atom,
    pub NetCloseWindow: xlib::Atom,
    pub NetNumberOfDesktops: xlib::Atom,
    pub NetCurrentDesktop: xlib::Atom,
}

impl XAtom {
    /// Advertised in `_NET_SUPPORTED` on the root window.
    pub fn net_supported(&self) -> Vec<xlib::Atom> {
        vec![
            self.NetActiveWindow,
            self.NetSupported,
            self.NetSupportingWmCheck,
            self.NetWMName,
            self.NetWMState,
            self.NetWMStateFullscreen,
            self.NetWMStateHidden,
            self.NetWMWindowType,
            self.NetWMDesktop,
            self.NetClientList,
            self.NetCloseWindow,
            self.NetNumberOfDesktops,
            self.NetCurrentDesktop,
        ]
    }

    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> XAtom {
        XAtom {
            WMProtocols: from(xlib, dpy, "WM_PROTOCOLS"),
            WMDelete: from(xlib, dpy, "WM_DELETE_WINDOW"),
            WMState: from(xlib, dpy, "WM_STATE"),
            WMTakeFocus: from(xlib, dpy, "WM_TAKE_FOCUS"),
            UTF8String: from(xlib, dpy, "UTF8_STRING"),
            NetActiveWindow: from(xlib, dpy, "_NET_ACTIVE_WINDOW"),
            NetSupported: from(xlib, dpy, "_NET_SUPPORTED"),
            NetSupportingWmCheck: from(xlib, dpy, "_NET_SUPPORTING_WM_CHECK"),
            NetWMName: from(xlib, dpy, "_NET_WM_NAME"),
            NetWMState: from(xlib, dpy, "_NET_WM_STATE"),
            NetWMStateFullscreen: from(xlib, dpy, "_NET_WM_STATE_FULLSCREEN"),
            NetWMStateHidden: from(xlib, dpy, "_NET_WM_STATE_HIDDEN"),
            NetWMWindowType: from(xlib, dpy, "_NET_WM_WINDOW_TYPE"),
            NetWMWindowTypeDesktop: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DESKTOP"),
            NetWMWindowTypeDock: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DOCK"),
            NetWMWindowTypeToolbar: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_TOOLBAR"),
            NetWMWindowTypeMenu: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_MENU"),
            NetWMWindowTypeUtility: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_UTILITY"),
            NetWMWindowTypeSplash: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_SPLASH"),
            NetWMWindowTypeDialog: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DIALOG"),
            NetWMWindowTypeNotification: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_NOTIFICATION"),
            NetWMWindowTypeTooltip: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_TOOLTIP"),
            NetWMDesktop: from(xlib, dpy, "_NET_WM_DESKTOP"),
            NetClientList: from(xlib, dpy, "_NET_CLIENT_LIST"),
            NetCloseWindow: from(xlib, dpy, "_NET_CLOSE_WINDOW"),
            NetNumberOfDesktops: from(xlib, dpy, "_NET_NUMBER_OF_DESKTOPS"),
            NetCurrentDesktop: from(xlib, dpy, "_NET_CURRENT_DESKTOP"),
        }
    }
}

// `XInternAtom`: https://tronche.com/gui/x/xlib/window-information/XInternAtom.html
fn from(xlib: &xlib::Xlib, dpy: *mut xlib::Display, s: &str) -> xlib::Atom {
    CString::new(s).map_or(0, |name| unsafe {
        (xlib.XInternAtom)(dpy, name.as_ptr(), xlib::False)
    })
}
