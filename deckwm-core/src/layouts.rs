//! Tiling modes.
//!
//! Every mode is a pure function from the tileable clients of a display (represented by their
//! effective border widths, in list order) and a [`LayoutArea`] to one rectangle per client.
mod dual_stack;
mod equal;
mod fibonacci;
mod grid;
mod monocle;
mod stack;

use crate::models::Xyhw;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const TILE: &str = "Tile";
pub const MONOCLE: &str = "Monocle";
pub const BOTTOM_STACK: &str = "BottomStack";
pub const GRID: &str = "Grid";
pub const FIBONACCI: &str = "Fibonacci";
pub const DUAL_STACK: &str = "DualStack";
pub const EQUAL: &str = "Equal";

/// All modes, indexed by their status line id.
pub const LAYOUTS: [Layout; 7] = [
    Layout::Tile,
    Layout::Monocle,
    Layout::BottomStack,
    Layout::Grid,
    Layout::Fibonacci,
    Layout::DualStack,
    Layout::Equal,
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Layout {
    /// Master on the left (right when inverted), stack on the other side.
    #[default]
    Tile,
    Monocle,
    /// Master on top (bottom when inverted), stack in a row below it.
    BottomStack,
    Grid,
    Fibonacci,
    /// Master centred between two stacks (three rows when inverted).
    DualStack,
    /// Equal columns (rows when inverted).
    Equal,
}

impl Layout {
    /// Numeric id reported on the status line.
    #[must_use]
    pub const fn id(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_id(id: usize) -> Option<Self> {
        LAYOUTS.get(id).copied()
    }

    /// Cycles through the modes by `delta` steps, wrapping in both directions.
    #[must_use]
    pub fn rotate(self, delta: i32) -> Self {
        let count = LAYOUTS.len() as i32;
        LAYOUTS[(self.id() as i32 + delta).rem_euclid(count) as usize]
    }

    /// The mode to use on a monitor taller than it is wide.
    #[must_use]
    pub const fn pivoted(self) -> Self {
        match self {
            Self::Tile => Self::BottomStack,
            Self::BottomStack => Self::Tile,
            other => other,
        }
    }

    /// Computes the placement of every tileable client. `borders` holds the effective border
    /// width of each tileable client in list order; the result has the same length.
    #[must_use]
    pub fn arrange(self, area: &LayoutArea, borders: &[i32]) -> Vec<Xyhw> {
        match borders {
            [] => vec![],
            [border] => vec![area.full_cover(*border)],
            _ => match self {
                Self::Tile => stack::update(area, borders, false),
                Self::BottomStack => stack::update(area, borders, true),
                Self::Monocle => monocle::update(area, borders),
                Self::Grid => grid::update(area, borders),
                Self::Fibonacci => fibonacci::update(area, borders),
                Self::DualStack => dual_stack::update(area, borders),
                Self::Equal => equal::update(area, borders),
            },
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tile => TILE,
            Self::Monocle => MONOCLE,
            Self::BottomStack => BOTTOM_STACK,
            Self::Grid => GRID,
            Self::Fibonacci => FIBONACCI,
            Self::DualStack => DUAL_STACK,
            Self::Equal => EQUAL,
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Could not parse layout: {0}")]
pub struct ParseLayoutError(String);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TILE => Ok(Self::Tile),
            MONOCLE => Ok(Self::Monocle),
            BOTTOM_STACK => Ok(Self::BottomStack),
            GRID => Ok(Self::Grid),
            FIBONACCI => Ok(Self::Fibonacci),
            DUAL_STACK => Ok(Self::DualStack),
            EQUAL => Ok(Self::Equal),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

/// The space a display's clients are arranged in, plus the display's layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutArea {
    pub width: i32,
    /// Height available to the layout, panel taken into account.
    pub height: i32,
    /// Vertical offset reserved above the layout.
    pub top: i32,
    /// Monitor height without the panel, the base for a vertical master extent.
    pub monitor_height: i32,
    pub gaps: i32,
    pub master_ratio: f64,
    /// Pixel adjustment added to the master extent.
    pub master_size: i32,
    /// Extra pixels given to the first stack window.
    pub growth: i32,
    pub invert: bool,
    pub min_window_size: i32,
    pub monocle_borders: bool,
}

impl LayoutArea {
    /// `base * ratio + adjustment`, truncated.
    #[must_use]
    pub fn master_extent(&self, base: i32) -> i32 {
        (f64::from(base) * self.master_ratio) as i32 + self.master_size
    }

    /// A single window covering the whole area.
    #[must_use]
    pub const fn full_cover(&self, border: i32) -> Xyhw {
        Xyhw::new(
            self.gaps,
            self.top + self.gaps,
            self.width - 2 * (border + self.gaps),
            self.height - 2 * (border + self.gaps),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn area(width: i32, height: i32, gaps: i32) -> LayoutArea {
        LayoutArea {
            width,
            height,
            top: 0,
            monitor_height: height,
            gaps,
            master_ratio: 0.52,
            master_size: 0,
            growth: 0,
            invert: false,
            min_window_size: 50,
            monocle_borders: false,
        }
    }

    #[test]
    fn ids_follow_status_line_order() {
        for (id, layout) in LAYOUTS.iter().enumerate() {
            assert_eq!(layout.id(), id);
            assert_eq!(Layout::from_id(id), Some(*layout));
        }
        assert_eq!(Layout::Equal.id(), 6);
        assert_eq!(Layout::from_id(7), None);
    }

    #[test]
    fn rotate_wraps_both_ways() {
        assert_eq!(Layout::Tile.rotate(-1), Layout::Equal);
        assert_eq!(Layout::Equal.rotate(1), Layout::Tile);
        assert_eq!(Layout::Monocle.rotate(2), Layout::Grid);
        assert_eq!(Layout::Grid.rotate(-10), Layout::Equal);
    }

    #[test]
    fn names_parse_back() {
        for layout in LAYOUTS {
            assert_eq!(layout.to_string().parse::<Layout>(), Ok(layout));
        }
        assert!("Spiral".parse::<Layout>().is_err());
    }

    #[test]
    fn a_single_tileable_client_always_covers_the_area() {
        let mut area = area(1000, 800, 4);
        area.top = 18;
        for layout in LAYOUTS {
            assert_eq!(
                layout.arrange(&area, &[2]),
                vec![Xyhw::new(4, 22, 1000 - 12, 800 - 12)]
            );
        }
        assert!(Layout::Tile.arrange(&area, &[]).is_empty());
    }

    #[test]
    fn every_mode_places_every_tileable_client() {
        let area = area(1280, 782, 4);
        for layout in LAYOUTS {
            for count in 2..9 {
                assert_eq!(layout.arrange(&area, &vec![2; count]).len(), count);
            }
        }
    }

    #[test]
    fn pivot_swaps_stack_orientation() {
        assert_eq!(Layout::Tile.pivoted(), Layout::BottomStack);
        assert_eq!(Layout::BottomStack.pivoted(), Layout::Tile);
        assert_eq!(Layout::Grid.pivoted(), Layout::Grid);
    }
}
