//! BinaryRegion - the binary raster mask every analysis runs on
//!
//! A region has fixed dimensions, a flat membership grid and a separate
//! append-only log of draw operations.
//!
//! # Draw log vs. live pixels
//!
//! `draw` always appends to the log, even when the pixel is already set.
//! `erase` clears membership but leaves the log untouched, so the log can
//! mention pixels that are no longer foreground. Use [`BinaryRegion::draws`]
//! when the raw operation history matters (the shape classifier compares
//! Hough votes against its length) and [`BinaryRegion::foreground_points`]
//! for the live pixel set.

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::point::Point;
use serde::{Deserialize, Serialize};

/// Binary raster mask with an ordered draw log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryRegion {
    width: u32,
    height: u32,
    /// Row-major membership grid, one byte per pixel
    mask: Vec<u8>,
    /// Number of set bytes in `mask`
    pixel_count: usize,
    /// Every successful draw, in call order
    draws: Vec<Point>,
}

impl BinaryRegion {
    /// Create an empty region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            mask: vec![0; size],
            pixel_count: 0,
            draws: Vec::new(),
        })
    }

    /// Create a region and draw every point of `points` in order.
    ///
    /// # Errors
    ///
    /// Fails on invalid dimensions or on the first out-of-bounds point.
    pub fn from_points<I>(width: u32, height: u32, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut region = Self::new(width, height)?;
        for p in points {
            region.draw(p.x, p.y)?;
        }
        Ok(region)
    }

    /// A region of the same size holding the given points that are live
    /// here, drawn in order. Other points are skipped.
    pub fn subregion<I>(&self, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut sub = Self {
            width: self.width,
            height: self.height,
            mask: vec![0; self.mask.len()],
            pixel_count: 0,
            draws: Vec::new(),
        };
        for p in points {
            if !self.contains(p) {
                continue;
            }
            let idx = self.index(p.x, p.y);
            if sub.mask[idx] == 0 {
                sub.mask[idx] = 1;
                sub.pixel_count += 1;
            }
            sub.draws.push(p);
        }
        sub
    }

    /// Threshold a grayscale image into a region.
    ///
    /// Pixels brighter than 128 become foreground, drawn in row-major order.
    #[cfg(feature = "image")]
    pub fn from_luma(image: &image::GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let mut region = Self::new(width, height)?;
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel.0[0] > 128 {
                region.draw(x as i32, y as i32)?;
            }
        }
        Ok(region)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether `(x, y)` lies inside the raster
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Mark a pixel as foreground and append it to the draw log.
    ///
    /// Drawing an already-set pixel leaves the pixel set unchanged but still
    /// appends a log entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the pixel lies outside the raster.
    pub fn draw(&mut self, x: i32, y: i32) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        if self.mask[idx] == 0 {
            self.mask[idx] = 1;
            self.pixel_count += 1;
        }
        self.draws.push(Point::new(x, y));
        Ok(())
    }

    /// Clear a pixel's membership.
    ///
    /// The draw log is not modified. Out-of-bounds and unset pixels are
    /// ignored.
    pub fn erase(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        if self.mask[idx] != 0 {
            self.mask[idx] = 0;
            self.pixel_count -= 1;
        }
    }

    /// Check membership; coordinates outside the raster are background.
    #[inline]
    pub fn is_drawn(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.mask[self.index(x, y)] != 0
    }

    /// Point form of [`BinaryRegion::is_drawn`]
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.is_drawn(p.x, p.y)
    }

    /// The raw draw log, including repeats and erased pixels
    pub fn draws(&self) -> &[Point] {
        &self.draws
    }

    /// Length of the draw log
    #[inline]
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Number of pixels currently set
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Live foreground pixels, each once, in first-draw order.
    pub fn foreground_points(&self) -> Vec<Point> {
        let mut seen = vec![false; self.mask.len()];
        let mut points = Vec::with_capacity(self.pixel_count);
        for &p in &self.draws {
            let idx = self.index(p.x, p.y);
            if self.mask[idx] != 0 && !seen[idx] {
                seen[idx] = true;
                points.push(p);
            }
        }
        points
    }

    /// Bounding box of the live pixels, or `None` for an empty region
    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        let mut bounds: Option<Bounds> = None;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.mask[self.index(x, y)] != 0 {
                    let p = Point::new(x, y);
                    match bounds.as_mut() {
                        Some(b) => b.include(p),
                        None => bounds = Some(Bounds::from_point(p)),
                    }
                }
            }
        }
        bounds
    }

    /// Check whether any live 8-neighbor of `(x, y)` is background.
    ///
    /// Neighbors outside the raster count as background.
    pub fn has_background_neighbor(&self, x: i32, y: i32) -> bool {
        Point::new(x, y)
            .neighbors8()
            .any(|n| !self.is_drawn(n.x, n.y))
    }
}
