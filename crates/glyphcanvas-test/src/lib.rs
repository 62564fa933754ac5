//! glyphcanvas-test - Regression test framework for glyphcanvas
//!
//! This crate provides the [`RegParams`] comparison tracker used by the
//! `tests/*_reg.rs` files of every crate, plus synthetic glyph fixtures
//! (rectangles, disks, ellipses, rings, lines, plus signs).
//!
//! # Usage
//!
//! ```ignore
//! use glyphcanvas_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("moments");
//! let disk = fixtures::filled_disk(64, 64, 32, 32, 12).unwrap();
//! rp.compare_values(452.0, disk.pixel_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
