//! Location capture core for geolog.
//!
//! This crate turns a user's "capture now" trigger into a durable, displayed
//! location record. It sits between a platform location service (behind the
//! [`LocationProvider`] trait) and the SQLite store in `geolog-store`.
//!
//! # Components
//!
//! - **Permission gate**: caches location-access authorization and prompts
//!   at most once per attempt
//! - **Capture flow**: permission, position read, durable insert, history
//!   update, guarded against overlapping triggers
//! - **Preference store**: the persisted dark-mode flag
//! - **App**: wires the above and produces a renderable [`ViewState`]
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use geolog_core::{App, LocationProvider, MockLocationProvider, PreferenceStore};
//! use geolog_store::Store;
//! use geolog_types::PermissionState;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider: Arc<dyn LocationProvider> = Arc::new(
//!         MockLocationProvider::builder()
//!             .permission(PermissionState::Granted)
//!             .position(37.7749, -122.4194)
//!             .build(),
//!     );
//!     let dir = std::env::temp_dir().join("geolog-doc");
//!     let app = App::new(
//!         Store::open_in_memory()?,
//!         provider,
//!         PreferenceStore::new(dir.join("preferences.json")),
//!     );
//!     app.start().await;
//!
//!     let outcome = app.capture().await;
//!     println!("{:?}", outcome.record());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod capture;
pub mod error;
pub mod events;
pub mod guard;
pub mod mock;
pub mod permission;
pub mod preferences;
pub mod traits;

pub use app::{App, StartOptions, StartupReport, ViewState};
pub use capture::{CaptureFlow, CaptureOutcome};
pub use error::{CaptureError, PreferenceError, ProviderError, Result};
pub use events::{Alert, AlertKind, AppEvent, EventDispatcher, EventReceiver, EventSender};
pub use guard::BusyGuard;
pub use mock::{MockLocationProvider, MockLocationProviderBuilder};
pub use permission::PermissionGate;
pub use preferences::{
    DARK_MODE_KEY, PreferenceStatus, PreferenceStore, default_preferences_path,
};
pub use traits::LocationProvider;

// Re-export the value types for convenience
pub use geolog_types::{Coordinates, LocationRecord, PermissionState, ThemeMode};
