//! Error types for geolog-store.

use std::path::PathBuf;

/// Result type for geolog-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in geolog-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite (rejected write, corruption, disk full, ...).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored timestamp could not be converted.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
