use deckwm_core::models::DragAxis;
use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

/// Font cursors shown on the root window and while dragging.
#[derive(Clone, Debug)]
pub struct XCursor {
    pub normal: c_ulong,
    pub resize: c_ulong,
    pub move_: c_ulong,
}

// Glyph indices from https://tronche.com/gui/x/xlib/appendix/b/
const LEFT_PTR: c_uint = 68;
const SIZING: c_uint = 120;
const FLEUR: c_uint = 52;

impl XCursor {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        unsafe {
            Self {
                normal: (xlib.XCreateFontCursor)(dpy, LEFT_PTR),
                resize: (xlib.XCreateFontCursor)(dpy, SIZING),
                move_: (xlib.XCreateFontCursor)(dpy, FLEUR),
            }
        }
    }

    pub const fn for_drag(&self, axis: DragAxis) -> c_ulong {
        match axis {
            DragAxis::Move => self.move_,
            DragAxis::Resize => self.resize,
        }
    }
}
