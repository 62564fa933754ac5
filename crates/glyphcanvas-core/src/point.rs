//! Integer pixel coordinates
//!
//! Coordinates are signed so that neighbor offsets and ray casting can step
//! outside the raster without wrapping; [`BinaryRegion`](crate::BinaryRegion)
//! treats anything outside `[0, W) x [0, H)` as background.

use serde::{Deserialize, Serialize};

/// Offsets of the 8-neighborhood, clockwise from the upper-left pixel.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Offsets of the 4-neighborhood.
pub const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A pixel coordinate.
///
/// `y` grows downward, as in raster images.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check whether `other` is one of the 8 neighbors of this point.
    ///
    /// A point is not its own neighbor.
    #[inline]
    pub fn is_adjacent8(self, other: Point) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// The 8 neighbors of this point, in [`NEIGHBORS_8`] order
    pub fn neighbors8(self) -> impl Iterator<Item = Point> {
        NEIGHBORS_8
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// The 4 neighbors of this point, in [`NEIGHBORS_4`] order
    pub fn neighbors4(self) -> impl Iterator<Item = Point> {
        NEIGHBORS_4
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
