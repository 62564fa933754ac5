//! Chamfer distance transform
//!
//! Two raster passes with orthogonal step 1 and diagonal step sqrt(2).
//! Background pixels hold exactly 0. Pixels outside the raster are treated
//! as background, so a foreground pixel on the raster border has distance 1.

use glyphcanvas_core::BinaryRegion;
use std::f64::consts::SQRT_2;

/// Neighbors already visited by the forward (top-left to bottom-right) pass
const FORWARD: [(i32, i32, f64); 4] = [(-1, -1, SQRT_2), (0, -1, 1.0), (1, -1, SQRT_2), (-1, 0, 1.0)];

/// Neighbors already visited by the backward pass
const BACKWARD: [(i32, i32, f64); 4] = [(1, 1, SQRT_2), (0, 1, 1.0), (-1, 1, SQRT_2), (1, 0, 1.0)];

/// Distance-to-background for every pixel of a region
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl DistanceMap {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance at `(x, y)`; 0 outside the raster
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f64 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0.0;
        }
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Largest distance in the map, 0 for an all-background region
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Raw row-major values
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Compute the chamfer distance transform of the live foreground.
pub fn distance_transform(region: &BinaryRegion) -> DistanceMap {
    let (w, h) = (region.width() as i32, region.height() as i32);
    let mut values: Vec<f64> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .map(|(x, y)| {
            if region.is_drawn(x, y) {
                f64::INFINITY
            } else {
                0.0
            }
        })
        .collect();

    let at = |values: &[f64], x: i32, y: i32| -> f64 {
        if x < 0 || y < 0 || x >= w || y >= h {
            0.0
        } else {
            values[(y * w + x) as usize]
        }
    };

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if values[idx] == 0.0 {
                continue;
            }
            let best = FORWARD
                .iter()
                .map(|&(dx, dy, cost)| at(&values, x + dx, y + dy) + cost)
                .fold(values[idx], f64::min);
            values[idx] = best;
        }
    }

    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let idx = (y * w + x) as usize;
            if values[idx] == 0.0 {
                continue;
            }
            let best = BACKWARD
                .iter()
                .map(|&(dx, dy, cost)| at(&values, x + dx, y + dy) + cost)
                .fold(values[idx], f64::min);
            values[idx] = best;
        }
    }

    DistanceMap {
        width: region.width(),
        height: region.height(),
        values,
    }
}
