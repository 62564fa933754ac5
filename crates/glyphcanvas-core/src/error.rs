//! Error types for glyphcanvas-core
//!
//! Analysis routines never fail on sparse or degenerate input; they return
//! empty results or numeric defaults instead. The errors here cover the
//! places where input is rejected outright: raster construction, drawing
//! outside the raster, and configuration validation.

use thiserror::Error;

/// glyphcanvas error type
#[derive(Error, Debug)]
pub enum Error {
    /// Raster dimensions must both be positive
    #[error("invalid region dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinate outside the raster
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} region")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for glyphcanvas operations
pub type Result<T> = std::result::Result<T, Error>;
