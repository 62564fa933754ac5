//! Edge extraction and gradient angles
//!
//! An edge pixel is a foreground pixel with at least one background pixel
//! among its 8 neighbors. Only interior coordinates `[1, W-2] x [1, H-2]`
//! are scanned, so shapes touching the raster border lose edge coverage
//! along that border.

use glyphcanvas_core::{BinaryRegion, Point};
use serde::{Deserialize, Serialize};

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Boundary pixel with its gradient orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePoint {
    pub point: Point,
    /// Sobel gradient angle in radians, `atan2(gy, gx)`
    pub angle: f64,
}

/// Sobel gradient angle at `(x, y)` over binary pixel values.
///
/// Pixels outside the raster count as 0. A pixel with a symmetric
/// neighborhood has a zero gradient and angle 0.
pub fn gradient_angle(region: &BinaryRegion, x: i32, y: i32) -> f64 {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for (j, (kx_row, ky_row)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
        for i in 0..3 {
            if region.is_drawn(x + i as i32 - 1, y + j as i32 - 1) {
                gx += kx_row[i];
                gy += ky_row[i];
            }
        }
    }
    gy.atan2(gx)
}

/// Extract the edge pixels of a region.
///
/// Pixels are visited column by column (x outer, y inner); the returned
/// order is that visiting order.
pub fn extract_edges(region: &BinaryRegion) -> Vec<EdgePoint> {
    let mut edges = Vec::new();
    let (w, h) = (region.width() as i32, region.height() as i32);
    for x in 1..w - 1 {
        for y in 1..h - 1 {
            if region.is_drawn(x, y) && region.has_background_neighbor(x, y) {
                edges.push(EdgePoint {
                    point: Point::new(x, y),
                    angle: gradient_angle(region, x, y),
                });
            }
        }
    }
    edges
}

/// Orientation bins reported by [`edge_angle_distribution`], in degrees
pub const ANGLE_BINS: [u32; 5] = [0, 45, 90, 135, 180];

/// Tolerance around each bin, in degrees
const BIN_TOLERANCE: f64 = 22.5;

/// One bin of an [`AngleDistribution`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleBin {
    pub degree: u32,
    pub count: usize,
    /// Share of all edges, in percent
    pub percentage: f64,
}

/// Histogram of edge gradient orientations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleDistribution {
    pub total: usize,
    pub bins: Vec<AngleBin>,
}

impl AngleDistribution {
    /// Bins that received at least one edge
    pub fn non_empty(&self) -> impl Iterator<Item = &AngleBin> {
        self.bins.iter().filter(|b| b.count > 0)
    }
}

/// Histogram edge orientations into the [`ANGLE_BINS`].
///
/// Negative angles are shifted by 180 degrees first. Each edge goes to the
/// first bin within 22.5 degrees (modulo 180); edges matching no bin are
/// only counted in `total`.
pub fn edge_angle_distribution(edges: &[EdgePoint]) -> AngleDistribution {
    let mut counts = [0usize; ANGLE_BINS.len()];
    for edge in edges {
        let mut degree = edge.angle.to_degrees();
        if degree < 0.0 {
            degree += 180.0;
        }
        let hit = ANGLE_BINS.iter().position(|&target| {
            let t = target as f64;
            (degree - t).abs() < BIN_TOLERANCE
                || (degree - t + 180.0).abs() < BIN_TOLERANCE
                || (degree - t - 180.0).abs() < BIN_TOLERANCE
        });
        if let Some(idx) = hit {
            counts[idx] += 1;
        }
    }

    let total = edges.len();
    let bins = ANGLE_BINS
        .iter()
        .zip(counts.iter())
        .map(|(&degree, &count)| AngleBin {
            degree,
            count,
            percentage: if total > 0 {
                count as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    AngleDistribution { total, bins }
}
