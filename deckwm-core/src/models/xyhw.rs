//! Window and screen rectangles.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

/// Window placement and size. x,y from top left.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub struct Xyhw {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Xyhw {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let max_x = self.x + self.w;
        let max_y = self.y + self.h;
        (self.x <= x && x <= max_x) && (self.y <= y && y <= max_y)
    }

    /// Same size, placed in the middle of an area `width` x `height`, pulled back by `border` so
    /// the outer edge is centred too.
    #[must_use]
    pub const fn centered_in(&self, width: i32, height: i32, border: i32) -> Self {
        Self {
            x: (width - self.w) / 2 - border,
            y: (height - self.h) / 2 - border,
            w: self.w,
            h: self.h,
        }
    }

    #[must_use]
    pub const fn with_position(&self, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            w: self.w,
            h: self.h,
        }
    }
}
