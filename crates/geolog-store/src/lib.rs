//! Local data persistence for captured locations.
//!
//! This crate provides an append-only SQLite store for location records.
//! Records are never updated or deleted; identifiers are assigned by the
//! database and never reused.
//!
//! # Example
//!
//! ```no_run
//! use geolog_store::Store;
//!
//! let store = Store::open_default()?;
//! let record = store.append(37.7749, -122.4194)?;
//!
//! // Newest first
//! let all = store.list_all()?;
//! assert_eq!(all[0].id, record.id);
//! # Ok::<(), geolog_store::Error>(())
//! ```

mod error;
mod models;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::StoredLocation;
pub use schema::SCHEMA_VERSION;
pub use store::Store;

/// Database file name.
pub const DATABASE_NAME: &str = "locations.sqlite";

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/geolog/locations.sqlite`
/// - macOS: `~/Library/Application Support/geolog/locations.sqlite`
/// - Windows: `C:\Users\<user>\AppData\Local\geolog\locations.sqlite`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("geolog")
        .join(DATABASE_NAME)
}
