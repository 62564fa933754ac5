//! glyphcanvas-character - Whole-glyph structural analysis
//!
//! A [`Character`] binds a [`BinaryRegion`](glyphcanvas_core::BinaryRegion)
//! to a validated [`CharacterConfig`](glyphcanvas_core::CharacterConfig).
//! This crate provides:
//!
//! - **Distance transform** - Two-pass chamfer distances to the background
//! - **Skeleton** - Ridge-based medial axis, branch tracing and pruning
//! - **Anchors** - Corners, junctions and bounding-box extrema
//! - **Topology** - Components, holes and the Euler number
//! - **Decomposition** - Cutting a glyph into fragments along segmentation lines
//! - **Analysis** - Per-fragment shape metrics, aggregates and classification,
//!   for one character or a batch
//!
//! # Examples
//!
//! ```
//! use glyphcanvas_character::{Character, analyze_character_topology, decompose_character};
//!
//! let mut ch = Character::with_default_config(24, 24).unwrap();
//! for i in 3..21 {
//!     ch.draw(12, i).unwrap();
//!     ch.draw(i, 12).unwrap();
//! }
//!
//! let topology = analyze_character_topology(&mut ch).unwrap();
//! assert_eq!(topology.summary.components, 1);
//! assert_eq!(topology.summary.holes, 0);
//!
//! let fragments = decompose_character(&mut ch);
//! let covered: usize = fragments.iter().map(|f| f.pixel_count()).sum();
//! assert_eq!(covered, ch.pixel_count());
//! ```

pub mod analysis;
pub mod anchor;
pub mod character;
pub mod decompose;
pub mod distance;
mod error;
pub mod skeleton;
pub mod topology;

pub use glyphcanvas_core;
pub use glyphcanvas_shape;

pub use analysis::{
    AggregateMetrics, CharacterAnalysis, Classification, ComplexityLevel, FragmentMetrics,
    TopologyKind, analyze_character, analyze_characters,
};
pub use anchor::{
    AnchorKind, AnchorPoint, contour_curvatures, contour_points, detect_anchors, filter_anchors,
    junction_components,
};
pub use character::Character;
pub use decompose::{
    LineSource, SegmentationLine, cast_ray_to_boundary, decompose_character, filter_lines,
    merge_small_regions, ray_length, segmentation_lines, split_by_lines, stroke_width,
};
pub use distance::{DistanceMap, distance_transform};
pub use error::{CharacterError, CharacterResult};
pub use skeleton::{
    Branch, BranchId, Skeleton, compute_skeleton, extract_ridge, prune_branches, trace_branches,
};
pub use topology::{
    CharacterTopology, TopologySummary, analyze_character_topology, count_components,
    count_holes, summarize,
};
