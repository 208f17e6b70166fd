//! Core types for location records, permissions and appearance.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A latitude/longitude pair as reported by a location provider.
///
/// No range validation is performed; values are trusted as returned by the
/// provider. Use [`Coordinates::is_finite`] to reject NaN or infinite values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {} | Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

/// A persisted location observation.
///
/// `id` is assigned by the store at insert time, is never reused and never
/// changes. Records are immutable once written.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl LocationRecord {
    /// The coordinates of this record.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Human-readable title used by list views, e.g. `Location 3`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Location {}", self.id)
    }
}

/// Location-access authorization state of the process.
///
/// Read at process start and changed only by an explicit user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PermissionState {
    /// The user has not been asked yet.
    #[default]
    Undetermined,
    /// The user granted location access.
    Granted,
    /// The user declined location access.
    Denied,
}

impl PermissionState {
    /// Returns `true` if location access is granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// Returns `true` if the user has not been asked yet.
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        matches!(self, PermissionState::Undetermined)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionState::Undetermined => write!(f, "undetermined"),
            PermissionState::Granted => write!(f, "granted"),
            PermissionState::Denied => write!(f, "denied"),
        }
    }
}

impl FromStr for PermissionState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undetermined" => Ok(PermissionState::Undetermined),
            "granted" => Ok(PermissionState::Granted),
            "denied" => Ok(PermissionState::Denied),
            other => Err(ParseError::InvalidValue(format!(
                "unknown permission state '{}'",
                other
            ))),
        }
    }
}

/// Light or dark appearance, derived from the persisted dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeMode {
    /// Light appearance (the default).
    #[default]
    Light,
    /// Dark appearance.
    Dark,
}

impl ThemeMode {
    /// Map the dark-mode boolean to a theme.
    #[must_use]
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Returns `true` for [`ThemeMode::Dark`].
    #[must_use]
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseError::InvalidValue(format!("unknown theme '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_is_finite() {
        assert!(Coordinates::new(37.7749, -122.4194).is_finite());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_finite());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_record_title_and_description() {
        let record = LocationRecord {
            id: 2,
            latitude: 40.7128,
            longitude: -74.006,
        };
        assert_eq!(record.title(), "Location 2");
        assert_eq!(
            record.coordinates().to_string(),
            "Latitude: 40.7128 | Longitude: -74.006"
        );
    }

    #[test]
    fn test_permission_state_parse() {
        assert_eq!("granted".parse(), Ok(PermissionState::Granted));
        assert_eq!(" Denied ".parse(), Ok(PermissionState::Denied));
        assert_eq!("UNDETERMINED".parse(), Ok(PermissionState::Undetermined));
        assert!("maybe".parse::<PermissionState>().is_err());
    }

    #[test]
    fn test_permission_state_default_is_undetermined() {
        let state = PermissionState::default();
        assert!(state.is_undetermined());
        assert!(!state.is_granted());
    }

    #[test]
    fn test_theme_mode_from_dark_mode() {
        assert_eq!(ThemeMode::from_dark_mode(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_dark_mode(false), ThemeMode::Light);
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
        assert_eq!("dark".parse(), Ok(ThemeMode::Dark));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_permission_state_serde_lowercase() {
        let json = serde_json::to_string(&PermissionState::Granted).unwrap();
        assert_eq!(json, "\"granted\"");
        let parsed: PermissionState = serde_json::from_str("\"denied\"").unwrap();
        assert_eq!(parsed, PermissionState::Denied);
    }
}
