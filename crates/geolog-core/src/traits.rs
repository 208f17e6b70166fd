//! Trait abstraction over the platform location service.
//!
//! [`LocationProvider`] is the seam between the capture flow and whatever
//! actually answers "may I?" and "where am I?": a mobile OS service, a
//! terminal prompt, or [`MockLocationProvider`](crate::MockLocationProvider)
//! in tests.

use async_trait::async_trait;

use geolog_types::{Coordinates, PermissionState};

use crate::error::ProviderError;

/// Platform location service.
///
/// # Example
///
/// ```ignore
/// use geolog_core::LocationProvider;
///
/// async fn where_am_i<P: LocationProvider>(provider: &P) {
///     if let Ok(Some(fix)) = provider.current_position().await {
///         println!("{}", fix);
///     }
/// }
/// ```
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Last-known authorization, without prompting.
    async fn permission_status(&self) -> PermissionState;

    /// Show the one-time grant/deny prompt and return the answer.
    ///
    /// Suspends until the user responds or the platform times out. Callers
    /// check [`permission_status`](Self::permission_status) first.
    async fn request_permission(&self) -> Result<PermissionState, ProviderError>;

    /// Read the current position. `Ok(None)` means no fix is available.
    async fn current_position(&self) -> Result<Option<Coordinates>, ProviderError>;
}
