//! glyphcanvas-core - Basic data structures for glyph shape analysis
//!
//! This crate provides the types shared by every analysis crate:
//!
//! - [`BinaryRegion`] - Binary raster mask with an ordered draw log
//! - [`Point`] / [`Bounds`] - Pixel coordinates and inclusive bounding boxes
//! - [`CharacterConfig`] / [`Connectivity`] - Character analysis settings
//! - [`Error`] / [`Result`] - Error handling
//!
//! # Examples
//!
//! ```
//! use glyphcanvas_core::BinaryRegion;
//!
//! let mut region = BinaryRegion::new(16, 16).unwrap();
//! region.draw(3, 4).unwrap();
//! region.draw(3, 4).unwrap();
//! assert_eq!(region.pixel_count(), 1);
//! assert_eq!(region.draw_count(), 2);
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod point;
pub mod region;

pub use bounds::Bounds;
pub use config::{CharacterConfig, Connectivity};
pub use error::{Error, Result};
pub use point::{NEIGHBORS_4, NEIGHBORS_8, Point};
pub use region::BinaryRegion;
