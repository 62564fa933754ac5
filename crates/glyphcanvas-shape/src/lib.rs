//! glyphcanvas-shape - Region shape analysis
//!
//! This crate classifies a single [`BinaryRegion`](glyphcanvas_core::BinaryRegion)
//! into a primitive shape:
//!
//! - **Moments** - Raw and central moments, Hu invariants and the derived
//!   circularity, linearity, rectangularity and ellipse axis ratio
//! - **Edges and contours** - Boundary pixels, Sobel angles, nearest-neighbor
//!   contour order, chain codes, curvature and corners
//! - **Hough transforms** - Line and circle voting
//! - **Classification** - Shape kind, fill kind and the kind-specific payload
//!
//! # Examples
//!
//! ```
//! use glyphcanvas_core::BinaryRegion;
//! use glyphcanvas_shape::{HuInvariants, Moments};
//!
//! let mut region = BinaryRegion::new(32, 32).unwrap();
//! for y in 8..24 {
//!     for x in 8..24 {
//!         region.draw(x, y).unwrap();
//!     }
//! }
//! let moments = Moments::from_region(&region);
//! let hu = HuInvariants::from_moments(&moments);
//! assert!(hu.circularity() > 0.99);
//! ```

pub mod classify;
pub mod contour;
pub mod descriptor;
pub mod edge;
pub mod hough;
pub mod moments;

// Re-export core types
pub use glyphcanvas_core;

pub use classify::{
    FillKind, ShapeKind, classify_shape, curve_strength, determine_fill, line_degree,
};
pub use contour::{
    ChainDirection, chain_code, chain_code_of, curvatures, detect_corners, mean_abs_curvature,
    order_contour,
};
pub use descriptor::{Shape, ShapeDescriptor, compute_shape_descriptor};
pub use edge::{
    ANGLE_BINS, AngleBin, AngleDistribution, EdgePoint, edge_angle_distribution, extract_edges,
    gradient_angle,
};
pub use hough::{HoughAccumulator, detect_circles, detect_lines};
pub use moments::{HuInvariants, Moments, REFERENCE_RECTANGLE_HU};
