//! Anchor point detection
//!
//! Anchors are the structurally significant pixels of a glyph: contour
//! corners, stroke junctions and bounding-box extrema. Detection runs in
//! five steps:
//!
//! 1. collect contour pixels (live pixels with a background 8-neighbor)
//! 2. estimate a signed turning angle at each contour pixel
//! 3. keep cyclic local maxima above the curvature threshold as corners
//! 4. find junctions from the 8-ring of every live pixel
//! 5. tag the pixels on each side of the bounding box
//!
//! Candidates are then ranked by strength and thinned so that no two kept
//! anchors are closer than `min_anchor_distance`.

use glyphcanvas_core::{BinaryRegion, CharacterConfig, NEIGHBORS_8, Point};
use glyphcanvas_shape::gradient_angle;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Half-width of the corner local-maximum window
const CORNER_WINDOW: isize = 3;
/// Strength given to every bounding-box extremum
const EXTREMUM_STRENGTH: f64 = 0.8;

/// Anchor categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnchorKind {
    Corner,
    /// Corner with curvature above twice the threshold
    SharpCorner,
    Junction,
    ExtremumLeft,
    ExtremumRight,
    ExtremumTop,
    ExtremumBottom,
}

impl AnchorKind {
    /// All kinds, in declaration order
    pub const ALL: [AnchorKind; 7] = [
        AnchorKind::Corner,
        AnchorKind::SharpCorner,
        AnchorKind::Junction,
        AnchorKind::ExtremumLeft,
        AnchorKind::ExtremumRight,
        AnchorKind::ExtremumTop,
        AnchorKind::ExtremumBottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnchorKind::Corner => "corner",
            AnchorKind::SharpCorner => "sharp_corner",
            AnchorKind::Junction => "junction",
            AnchorKind::ExtremumLeft => "extremum_left",
            AnchorKind::ExtremumRight => "extremum_right",
            AnchorKind::ExtremumTop => "extremum_top",
            AnchorKind::ExtremumBottom => "extremum_bottom",
        }
    }

    #[inline]
    pub fn is_extremum(self) -> bool {
        matches!(
            self,
            AnchorKind::ExtremumLeft
                | AnchorKind::ExtremumRight
                | AnchorKind::ExtremumTop
                | AnchorKind::ExtremumBottom
        )
    }
}

/// A detected anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub point: Point,
    pub kind: AnchorKind,
    /// Confidence in [0, 1]
    pub strength: f64,
    /// Curvature magnitude, 0 for non-corner anchors
    pub curvature: f64,
    /// Sobel gradient angle at the pixel
    pub direction: f64,
}

impl AnchorPoint {
    fn new(
        region: &BinaryRegion,
        point: Point,
        kind: AnchorKind,
        strength: f64,
        curvature: f64,
    ) -> Self {
        Self {
            point,
            kind,
            strength,
            curvature,
            direction: gradient_angle(region, point.x, point.y),
        }
    }
}

/// Live pixels with a background (or out-of-raster) 8-neighbor, in
/// first-draw order.
pub fn contour_points(region: &BinaryRegion) -> Vec<Point> {
    region
        .foreground_points()
        .into_iter()
        .filter(|p| region.has_background_neighbor(p.x, p.y))
        .collect()
}

/// Signed turning angle at every point of a cyclic point sequence.
///
/// The window is `min(max(3, round(1 / epsilon)), n / 3)`. At point `i`
/// the incoming vector `p[i] - p[i-w]` and the outgoing vector
/// `p[i+w] - p[i]` are compared: the value is the angle between them,
/// negative for a clockwise turn, and 0 when either vector is shorter than
/// `epsilon`.
pub fn contour_curvatures(points: &[Point], epsilon: f64) -> Vec<f64> {
    let n = points.len();
    if n < 3 {
        return vec![0.0; n];
    }
    let window = ((1.0 / epsilon).round() as usize).max(3).min(n / 3).max(1);

    (0..n)
        .map(|i| {
            let prev = points[(i + n - window) % n];
            let curr = points[i];
            let next = points[(i + window) % n];

            let (v1x, v1y) = ((curr.x - prev.x) as f64, (curr.y - prev.y) as f64);
            let (v2x, v2y) = ((next.x - curr.x) as f64, (next.y - curr.y) as f64);
            let len1 = v1x.hypot(v1y);
            let len2 = v2x.hypot(v2y);
            if len1 < epsilon || len2 < epsilon {
                return 0.0;
            }

            let cos = ((v1x * v2x + v1y * v2y) / (len1 * len2)).clamp(-1.0, 1.0);
            let angle = cos.acos();
            if v1x * v2y - v1y * v2x < 0.0 {
                -angle
            } else {
                angle
            }
        })
        .collect()
}

/// Number of 4-connected foreground groups in the 8-ring around `p`.
///
/// The center pixel is excluded and the flood fill never leaves the 3x3
/// window.
pub fn junction_components(region: &BinaryRegion, p: Point) -> usize {
    let mut ring = [false; 9];
    for &(dx, dy) in &NEIGHBORS_8 {
        ring[((dy + 1) * 3 + dx + 1) as usize] = region.is_drawn(p.x + dx, p.y + dy);
    }

    let mut seen = [false; 9];
    let mut components = 0;
    for start in 0..9 {
        if start == 4 || !ring[start] || seen[start] {
            continue;
        }
        components += 1;
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(cell) = stack.pop() {
            let (cx, cy) = ((cell % 3) as i32, (cell / 3) as i32);
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (cx + dx, cy + dy);
                if !(0..3).contains(&nx) || !(0..3).contains(&ny) {
                    continue;
                }
                let ni = (ny * 3 + nx) as usize;
                if ni != 4 && ring[ni] && !seen[ni] {
                    seen[ni] = true;
                    stack.push(ni);
                }
            }
        }
    }
    components
}

fn corner_anchors(region: &BinaryRegion, config: &CharacterConfig, out: &mut Vec<AnchorPoint>) {
    let contour = contour_points(region);
    if contour.len() < 3 {
        return;
    }
    let curv = contour_curvatures(&contour, config.medial_axis_epsilon);
    let n = curv.len() as isize;
    let threshold = config.curvature_threshold;

    for (i, &k) in curv.iter().enumerate() {
        let mag = k.abs();
        if mag <= threshold {
            continue;
        }
        let is_max = (-CORNER_WINDOW..=CORNER_WINDOW).all(|off| {
            let j = (i as isize + off).rem_euclid(n) as usize;
            j == i || mag > curv[j].abs()
        });
        if !is_max {
            continue;
        }
        let kind = if mag > threshold * 2.0 {
            AnchorKind::SharpCorner
        } else {
            AnchorKind::Corner
        };
        let strength = (mag / PI).min(1.0);
        out.push(AnchorPoint::new(region, contour[i], kind, strength, mag));
    }
}

fn junction_anchors(region: &BinaryRegion, out: &mut Vec<AnchorPoint>) {
    for p in region.foreground_points() {
        let components = junction_components(region, p);
        if components >= 3 {
            let strength = ((components as f64 - 2.0) / 3.0).min(1.0);
            out.push(AnchorPoint::new(region, p, AnchorKind::Junction, strength, 0.0));
        }
    }
}

fn extremum_anchors(region: &BinaryRegion, out: &mut Vec<AnchorPoint>) {
    let Some(b) = region.bounds() else {
        return;
    };
    for p in region.foreground_points() {
        let sides = [
            (p.x == b.min_x, AnchorKind::ExtremumLeft),
            (p.x == b.max_x, AnchorKind::ExtremumRight),
            (p.y == b.min_y, AnchorKind::ExtremumTop),
            (p.y == b.max_y, AnchorKind::ExtremumBottom),
        ];
        for (on_side, kind) in sides {
            if on_side {
                out.push(AnchorPoint::new(region, p, kind, EXTREMUM_STRENGTH, 0.0));
            }
        }
    }
}

/// Rank anchors by strength and thin them.
///
/// The sort is stable, so equal strengths keep detection order. An anchor
/// is kept only when it is farther than `min_distance` from every anchor
/// kept before it.
pub fn filter_anchors(mut anchors: Vec<AnchorPoint>, min_distance: f64) -> Vec<AnchorPoint> {
    anchors.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    let mut kept: Vec<AnchorPoint> = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        if kept
            .iter()
            .all(|k| k.point.distance(anchor.point) > min_distance)
        {
            kept.push(anchor);
        }
    }
    kept
}

/// Detect the anchors of a region.
///
/// Junction detection is skipped when `enable_junction_detection` is off.
pub fn detect_anchors(region: &BinaryRegion, config: &CharacterConfig) -> Vec<AnchorPoint> {
    let mut candidates = Vec::new();
    corner_anchors(region, config, &mut candidates);
    let corners = candidates.len();
    if config.enable_junction_detection {
        junction_anchors(region, &mut candidates);
    }
    let junctions = candidates.len() - corners;
    extremum_anchors(region, &mut candidates);

    let total = candidates.len();
    let anchors = filter_anchors(candidates, config.min_anchor_distance);
    tracing::debug!(
        corners,
        junctions,
        candidates = total,
        kept = anchors.len(),
        "anchor detection finished"
    );
    anchors
}
