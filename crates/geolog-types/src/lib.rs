//! Platform-agnostic types for the geolog location journal.
//!
//! This crate holds the value types shared by the store (`geolog-store`),
//! the capture core (`geolog-core`) and the command-line front end.
//!
//! # Example
//!
//! ```
//! use geolog_types::{Coordinates, PermissionState};
//!
//! let fix = Coordinates::new(37.7749, -122.4194);
//! assert!(fix.is_finite());
//!
//! let state: PermissionState = "granted".parse().unwrap();
//! assert!(state.is_granted());
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{Coordinates, LocationRecord, PermissionState, ThemeMode};
