//! Data models for stored data.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use geolog_types::LocationRecord;

/// A location row including its audit timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    /// Database row ID.
    pub id: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// When the row was inserted (database clock, UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredLocation {
    /// Drop the audit timestamp.
    pub fn to_record(&self) -> LocationRecord {
        LocationRecord {
            id: self.id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<StoredLocation> for LocationRecord {
    fn from(stored: StoredLocation) -> Self {
        stored.to_record()
    }
}
