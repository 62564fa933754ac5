//! Error types for glyphcanvas-character

use thiserror::Error;

/// Errors that can occur while building or editing a character
#[derive(Debug, Error)]
pub enum CharacterError {
    /// Core library error (bad dimensions, out-of-bounds draw, bad config)
    #[error("core error: {0}")]
    Core(#[from] glyphcanvas_core::Error),
}

/// Result type for character operations
pub type CharacterResult<T> = Result<T, CharacterError>;
