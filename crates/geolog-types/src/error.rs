//! Error types for value parsing in geolog-types.

use thiserror::Error;

/// Errors that can occur when parsing geolog values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The text does not name a known value.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias using geolog-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
