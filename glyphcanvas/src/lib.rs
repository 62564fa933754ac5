//! glyphcanvas - Glyph shape analysis for Rust
//!
//! # Overview
//!
//! glyphcanvas analyzes small binary rasters of hand-drawn or rendered
//! glyphs:
//!
//! - Region moments and Hu invariants
//! - Edge extraction, chain codes, curvature and corners
//! - Hough line and circle detection
//! - Primitive shape classification (circle, line, curve, triangle,
//!   rectangle) with fill detection
//! - Anchor points, medial axis and topology of whole characters
//! - Decomposition of a character into simpler fragments
//!
//! # Example
//!
//! ```
//! use glyphcanvas::{BinaryRegion, Shape, compute_shape_descriptor};
//!
//! let mut region = BinaryRegion::new(64, 64).unwrap();
//! for i in 10..60 {
//!     region.draw(i, i).unwrap();
//! }
//! let desc = compute_shape_descriptor(&region).unwrap();
//! assert_eq!(desc.shape, Shape::StraightLine { degree: 45.0 });
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphcanvas_core::*;

// Re-export analysis crates as modules to avoid name conflicts
pub use glyphcanvas_character as character;
pub use glyphcanvas_shape as shape;

// Top-level entry points
pub use glyphcanvas_character::{
    Character, CharacterAnalysis, CharacterTopology, analyze_character,
    analyze_character_topology, analyze_characters, decompose_character,
};
pub use glyphcanvas_shape::{
    FillKind, HuInvariants, Moments, Shape, ShapeDescriptor, ShapeKind, compute_shape_descriptor,
};
