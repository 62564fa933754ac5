//! Shape classification
//!
//! The classifier combines Hough results, Hu-invariant metrics and contour
//! corners into one of five primitive kinds. Fill kind is decided
//! separately from the ratio of boundary pixels among interior pixels.

use crate::contour::{detect_corners, mean_abs_curvature};
use crate::edge::EdgePoint;
use crate::hough::HoughAccumulator;
use crate::moments::HuInvariants;
use glyphcanvas_core::BinaryRegion;
use serde::{Deserialize, Serialize};

/// Primitive shape categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    StraightLine,
    CurvedLine,
    Triangle,
    Rectangle,
}

impl ShapeKind {
    /// All kinds, in declaration order
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::StraightLine,
        ShapeKind::CurvedLine,
        ShapeKind::Triangle,
        ShapeKind::Rectangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::StraightLine => "straight_line",
            ShapeKind::CurvedLine => "curved_line",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Rectangle => "rectangle",
        }
    }
}

/// Whether a region is a solid blob or a thin outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillKind {
    #[default]
    Filled,
    /// Thin, boundary-dominated region such as a pen stroke or outline
    Outline,
}

/// Boundary-pixel ratio above which a region counts as an outline
const OUTLINE_RATIO: f64 = 0.3;

/// Decide the fill kind of a region.
///
/// Over interior foreground pixels (`[1, W-2] x [1, H-2]`), the fraction
/// with a background 8-neighbor is compared against 0.3.
pub fn determine_fill(region: &BinaryRegion) -> FillKind {
    let (w, h) = (region.width() as i32, region.height() as i32);
    let mut total = 0usize;
    let mut boundary = 0usize;
    for x in 1..w - 1 {
        for y in 1..h - 1 {
            if region.is_drawn(x, y) {
                total += 1;
                if region.has_background_neighbor(x, y) {
                    boundary += 1;
                }
            }
        }
    }
    if total > 0 && boundary as f64 / total as f64 > OUTLINE_RATIO {
        FillKind::Outline
    } else {
        FillKind::Filled
    }
}

/// Pick a shape kind.
///
/// Rules are tried in order and the first match wins:
///
/// 1. top circle votes above `drawn / 3` and circularity above 0.7: circle
/// 2. top line votes above `drawn / 2` and linearity above 0.8: straight line
/// 3. exactly 3 corners: triangle; exactly 4 corners and rectangularity
///    above 0.7: rectangle
/// 4. mean absolute curvature in (0.1, 0.8): curved line
/// 5. otherwise straight line
///
/// # Arguments
///
/// * `drawn` - Length of the region's draw log
/// * `hu` - Hu invariants of the region
/// * `curvatures` - Contour curvature sequence
/// * `lines` - Ranked Hough lines
/// * `circles` - Ranked Hough circles
pub fn classify_shape(
    drawn: usize,
    hu: &HuInvariants,
    curvatures: &[f64],
    lines: &[HoughAccumulator],
    circles: &[HoughAccumulator],
) -> ShapeKind {
    let drawn = drawn as u32;
    if circles.first().is_some_and(|c| c.votes > drawn / 3) && hu.circularity() > 0.7 {
        return ShapeKind::Circle;
    }
    if lines.first().is_some_and(|l| l.votes > drawn / 2) && hu.linearity() > 0.8 {
        return ShapeKind::StraightLine;
    }

    match detect_corners(curvatures).len() {
        3 => return ShapeKind::Triangle,
        4 if hu.rectangularity() > 0.7 => return ShapeKind::Rectangle,
        _ => {}
    }

    let mean = mean_abs_curvature(curvatures);
    if mean > 0.1 && mean < 0.8 {
        ShapeKind::CurvedLine
    } else {
        ShapeKind::StraightLine
    }
}

const SNAP_TARGETS: [f64; 4] = [0.0, 45.0, 90.0, 135.0];

/// Direction of the strongest Hough line in degrees, snapped to
/// 0, 45, 90, 135 or 180.
///
/// Hough theta is the line normal, so 90 degrees is subtracted first. The
/// result is 180 rather than 0 when the raw direction is closer to 180.
/// No lines yield 0.
pub fn line_degree(lines: &[HoughAccumulator]) -> f64 {
    let Some(top) = lines.first() else {
        return 0.0;
    };

    let mut degree = top.theta.to_degrees() - 90.0;
    if degree < 0.0 {
        degree += 180.0;
    }
    if degree >= 180.0 {
        degree -= 180.0;
    }

    let mut best = 0.0;
    let mut min_diff = f64::MAX;
    for target in SNAP_TARGETS {
        for candidate in [target, target + 180.0, target - 180.0] {
            let diff = (degree - candidate).abs();
            if diff < min_diff {
                min_diff = diff;
                best = target;
            }
        }
    }

    if best == 0.0 && (degree - 180.0).abs() < degree.abs() {
        180.0
    } else {
        best
    }
}

/// Signed curve strength in [-1, 1].
///
/// The magnitude is `tanh(2 * mean |k|)` plus `0.3 * (positive share - 0.5)`
/// where the positive share is the sum of positive curvature over the sum
/// of absolute curvature. The sign is +1 when the first-to-last vector of
/// `contour` points right or up, -1 otherwise, and 0 with fewer than two
/// contour points.
pub fn curve_strength(curvatures: &[f64], contour: &[EdgePoint]) -> f64 {
    if curvatures.is_empty() {
        return 0.0;
    }

    let total: f64 = curvatures.iter().map(|c| c.abs()).sum();
    let positive: f64 = curvatures.iter().filter(|&&c| c > 0.0).sum();
    let mean = total / curvatures.len() as f64;

    let direction = match (contour.first(), contour.last()) {
        (Some(start), Some(end)) if contour.len() >= 2 => {
            let dx = end.point.x - start.point.x;
            let dy = end.point.y - start.point.y;
            if dx > 0 || dy < 0 { 1.0 } else { -1.0 }
        }
        _ => 0.0,
    };

    let mut strength = (mean * 2.0).tanh();
    if total > 0.0 {
        strength += (positive / total - 0.5) * 0.3;
    }
    (strength * direction).clamp(-1.0, 1.0)
}
