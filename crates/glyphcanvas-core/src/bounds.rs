//! Bounds - inclusive pixel bounding boxes

use crate::point::Point;
use serde::{Deserialize, Serialize};

/// Inclusive bounding box of a pixel set.
///
/// Unlike a width/height rectangle, both corners are real pixel positions,
/// so a single pixel has `width() == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Leftmost column
    pub min_x: i32,
    /// Topmost row
    pub min_y: i32,
    /// Rightmost column
    pub max_x: i32,
    /// Bottom row
    pub max_y: i32,
}

impl Bounds {
    /// Bounds covering a single point
    pub const fn from_point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Bounds of a point set, or `None` if it is empty
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grow the bounds to cover `p`
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }

    /// Number of pixels covered by the box
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if a point lies inside the box (edges included)
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [Point::new(3, 7), Point::new(10, 2), Point::new(5, 5)];
        let b = Bounds::from_points(pts).unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (3, 2, 10, 7));
        assert_eq!(b.width(), 8);
        assert_eq!(b.height(), 6);
        assert_eq!(b.area(), 48);
        assert!(b.contains(Point::new(10, 7)));
        assert!(!b.contains(Point::new(11, 7)));
    }

    #[test]
    fn test_empty() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_single_point() {
        let b = Bounds::from_point(Point::new(4, 4));
        assert_eq!(b.area(), 1);
    }
}
