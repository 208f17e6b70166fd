//! Error types for geolog-core.
//!
//! # Taxonomy
//!
//! | Error | User-visible | Recovery |
//! |-------|--------------|----------|
//! | [`CaptureError::PermissionDenied`] | yes | abort this capture, retry on next trigger |
//! | [`CaptureError::SensorUnavailable`] | yes | abort this capture, retry on next trigger |
//! | [`CaptureError::InvalidCoordinates`] | yes (as unavailable) | abort this capture |
//! | [`CaptureError::Provider`] | yes (generic) | abort this capture |
//! | [`CaptureError::StoreWrite`] | yes (generic) | history left unchanged |
//! | [`PreferenceError`] | no | logged, in-memory value kept |
//!
//! None of these terminate the process.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::events::{Alert, AlertKind};

/// Errors reported by a [`LocationProvider`](crate::LocationProvider).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The location service could not be reached or refused the request.
    #[error("Location service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The permission prompt could not be shown or answered.
    #[error("Permission prompt failed: {0}")]
    PromptFailed(String),

    /// The platform gave up waiting.
    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of a single capture invocation.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    /// The user declined location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider could not fix a position.
    #[error("Current location unavailable")]
    SensorUnavailable,

    /// The provider returned NaN or infinite coordinates.
    #[error("Invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Reported latitude.
        latitude: f64,
        /// Reported longitude.
        longitude: f64,
    },

    /// The provider failed while prompting or reading.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The durable insert failed.
    #[error("Failed to store location: {0}")]
    StoreWrite(#[from] geolog_store::Error),
}

impl CaptureError {
    /// The alert category shown to the user for this error.
    pub fn alert_kind(&self) -> AlertKind {
        match self {
            Self::PermissionDenied => AlertKind::PermissionDenied,
            Self::SensorUnavailable | Self::InvalidCoordinates { .. } => {
                AlertKind::LocationUnavailable
            }
            Self::Provider(_) | Self::StoreWrite(_) => AlertKind::CaptureFailed,
        }
    }

    /// The user-facing alert for this error.
    pub fn alert(&self) -> Alert {
        Alert::new(self.alert_kind())
    }
}

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors reading or writing the preference file.
///
/// Never surfaced to the user; see [`PreferenceStore`](crate::PreferenceStore).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferenceError {
    /// Reading the preference file failed.
    #[error("Failed to read preferences {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the preference file failed.
    #[error("Failed to write preferences {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The preference file is not valid JSON.
    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),

    /// A stored value has the wrong shape.
    #[error("Invalid value for preference '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_mapping() {
        assert_eq!(
            CaptureError::PermissionDenied.alert_kind(),
            AlertKind::PermissionDenied
        );
        assert_eq!(
            CaptureError::SensorUnavailable.alert_kind(),
            AlertKind::LocationUnavailable
        );
        assert_eq!(
            CaptureError::InvalidCoordinates {
                latitude: f64::NAN,
                longitude: 0.0
            }
            .alert_kind(),
            AlertKind::LocationUnavailable
        );
        assert_eq!(
            CaptureError::Provider(ProviderError::Timeout(Duration::from_secs(5))).alert_kind(),
            AlertKind::CaptureFailed
        );
    }

    #[test]
    fn test_error_display() {
        let err = CaptureError::from(ProviderError::ServiceUnavailable("gps off".into()));
        assert_eq!(err.to_string(), "Location service unavailable: gps off");

        let err = ProviderError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("10s"));
    }
}
