//! Shape descriptors
//!
//! [`compute_shape_descriptor`] is the single entry point that runs the
//! whole region pipeline: edges, contour, curvature, moments, Hough voting,
//! classification and the kind-specific payload.

use crate::classify::{
    FillKind, ShapeKind, classify_shape, curve_strength, determine_fill, line_degree,
};
use crate::contour::{chain_code_of, curvatures, detect_corners, order_contour};
use crate::edge::{edge_angle_distribution, extract_edges};
use crate::hough::{detect_circles, detect_lines};
use crate::moments::{HuInvariants, Moments};
use glyphcanvas_core::BinaryRegion;
use serde::{Deserialize, Serialize};

/// A classified shape with its kind-specific measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Minor/major axis ratio of the moment ellipse, 1.0 for a disk
    Circle { ellipse_ratio: f64 },
    /// Direction snapped to 0, 45, 90, 135 or 180 degrees
    StraightLine { degree: f64 },
    /// Signed bend strength in [-1, 1]
    CurvedLine { strength: f64 },
    Triangle,
    Rectangle,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::StraightLine { .. } => ShapeKind::StraightLine,
            Shape::CurvedLine { .. } => ShapeKind::CurvedLine,
            Shape::Triangle => ShapeKind::Triangle,
            Shape::Rectangle => ShapeKind::Rectangle,
        }
    }
}

/// Classification result for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub shape: Shape,
    pub fill: FillKind,
}

impl ShapeDescriptor {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

/// Classify a region.
///
/// Returns `None` when the draw log holds fewer than 3 entries or fewer
/// than 3 edge pixels are found; there is not enough data for a shape.
///
/// # Examples
///
/// ```
/// use glyphcanvas_core::BinaryRegion;
/// use glyphcanvas_shape::{FillKind, Shape, compute_shape_descriptor};
///
/// let mut region = BinaryRegion::new(64, 64).unwrap();
/// for x in 10..60 {
///     region.draw(x, 32).unwrap();
/// }
/// let desc = compute_shape_descriptor(&region).unwrap();
/// assert_eq!(desc.shape, Shape::StraightLine { degree: 0.0 });
/// assert_eq!(desc.fill, FillKind::Outline);
/// ```
pub fn compute_shape_descriptor(region: &BinaryRegion) -> Option<ShapeDescriptor> {
    let drawn = region.draw_count();
    if drawn < 3 {
        return None;
    }

    let edges = extract_edges(region);
    if edges.len() < 3 {
        return None;
    }

    let contour = order_contour(&edges);
    let codes = chain_code_of(&contour);
    let curv = curvatures(&codes);

    let moments = Moments::from_region(region);
    let hu = HuInvariants::from_moments(&moments);

    let lines = detect_lines(region.width(), region.height(), &edges);
    let circles = detect_circles(region.width(), region.height(), &edges);

    let fill = determine_fill(region);
    let kind = classify_shape(drawn, &hu, &curv, &lines, &circles);

    let shape = match kind {
        ShapeKind::Circle => Shape::Circle {
            ellipse_ratio: moments.ellipse_axis_ratio(),
        },
        ShapeKind::StraightLine => {
            let degree = line_degree(&lines);
            tracing::debug!(degree, "straight line detected");
            Shape::StraightLine { degree }
        }
        ShapeKind::CurvedLine => {
            let strength = curve_strength(&curv, &contour);
            tracing::debug!(strength, "curve detected");
            Shape::CurvedLine { strength }
        }
        ShapeKind::Triangle => {
            tracing::debug!(corners = detect_corners(&curv).len(), "triangle detected");
            Shape::Triangle
        }
        ShapeKind::Rectangle => {
            tracing::debug!(corners = detect_corners(&curv).len(), "rectangle detected");
            Shape::Rectangle
        }
    };

    if tracing::enabled!(tracing::Level::DEBUG) {
        let dist = edge_angle_distribution(&edges);
        for bin in dist.non_empty() {
            tracing::debug!(
                degree = bin.degree,
                count = bin.count,
                "edge angle share {:.1}%",
                bin.percentage
            );
        }
    }

    Some(ShapeDescriptor { shape, fill })
}
