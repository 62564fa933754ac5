//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Region construction failed
    #[error("region error: {0}")]
    Region(#[from] glyphcanvas_core::Error),

    /// Fixture parameters do not fit the raster
    #[error("invalid fixture '{name}': {message}")]
    InvalidFixture { name: &'static str, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
