//! Persisted dark-mode preference.
//!
//! Preferences live in a small JSON key-value file. The dark-mode slot uses
//! the key `darkMode` with a serialized boolean (`"true"` / `"false"`);
//! a missing file or key means light mode.
//!
//! Failures are never surfaced to the user: `load` falls back to `false`,
//! `save` keeps the in-memory value in effect for the session. Both record
//! the failure in [`PreferenceStore::status`] and log it.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PreferenceError;

/// Key of the dark-mode slot.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Default preference file path following platform conventions.
///
/// - Linux: `~/.config/geolog/preferences.json`
/// - macOS: `~/Library/Application Support/geolog/preferences.json`
/// - Windows: `C:\Users\<user>\AppData\Roaming\geolog\preferences.json`
pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geolog")
        .join("preferences.json")
}

/// Health of preference persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PreferenceStatus {
    /// The last read or write succeeded.
    #[default]
    Healthy,
    /// The last read or write failed; the next launch may see a stale value.
    Degraded { reason: String },
}

impl PreferenceStatus {
    /// Returns `true` if the last operation failed.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// File-backed store for the dark-mode preference.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    status: RwLock<PreferenceStatus>,
}

impl PreferenceStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            status: RwLock::new(PreferenceStatus::Healthy),
        }
    }

    /// Create a store at [`default_preferences_path`].
    pub fn open_default() -> Self {
        Self::new(default_preferences_path())
    }

    /// Path of the preference file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Outcome of the last load or save.
    pub fn status(&self) -> PreferenceStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read the dark-mode preference. Returns `false` on any failure.
    pub async fn load(&self) -> bool {
        match self.try_load().await {
            Ok(value) => {
                self.set_status(PreferenceStatus::Healthy);
                debug!("Loaded dark mode preference: {}", value);
                value
            }
            Err(e) => {
                warn!("Failed to load dark mode preference, using light mode: {}", e);
                self.set_status(PreferenceStatus::Degraded {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Persist the dark-mode preference. Failures are logged, never returned.
    pub async fn save(&self, value: bool) {
        match self.try_save(value).await {
            Ok(()) => {
                self.set_status(PreferenceStatus::Healthy);
                debug!("Saved dark mode preference: {}", value);
            }
            Err(e) => {
                warn!("Failed to save dark mode preference: {}", e);
                self.set_status(PreferenceStatus::Degraded {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Read the dark-mode preference, reporting failures.
    pub async fn try_load(&self) -> Result<bool, PreferenceError> {
        let Some(entries) = self.read_entries().await? else {
            return Ok(false);
        };

        match entries.get(DARK_MODE_KEY) {
            None => Ok(false),
            Some(raw) => {
                serde_json::from_str::<bool>(raw).map_err(|_| PreferenceError::InvalidValue {
                    key: DARK_MODE_KEY.to_string(),
                    value: raw.clone(),
                })
            }
        }
    }

    /// Persist the dark-mode preference, reporting failures.
    ///
    /// Other keys in the file are preserved. An unreadable file is replaced.
    pub async fn try_save(&self, value: bool) -> Result<(), PreferenceError> {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!("Replacing unreadable preference file: {}", e);
                BTreeMap::new()
            }
        };
        entries.insert(DARK_MODE_KEY.to_string(), serde_json::to_string(&value)?);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PreferenceError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| PreferenceError::Write {
                path: self.path.clone(),
                source: e,
            })
    }

    async fn read_entries(&self) -> Result<Option<BTreeMap<String, String>>, PreferenceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PreferenceError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn set_status(&self, status: PreferenceStatus) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_defaults_to_false_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));

        assert!(!store.load().await);
        assert_eq!(store.status(), PreferenceStatus::Healthy);
    }

    #[tokio::test]
    async fn test_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        PreferenceStore::new(&path).save(true).await;
        assert!(PreferenceStore::new(&path).load().await);

        PreferenceStore::new(&path).save(false).await;
        assert!(!PreferenceStore::new(&path).load().await);
    }

    #[tokio::test]
    async fn test_value_is_serialized_boolean_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        PreferenceStore::new(&path).save(true).await;

        let raw = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.get(DARK_MODE_KEY).map(String::as_str), Some("true"));
    }

    #[tokio::test]
    async fn test_save_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"language":"\"pt-BR\""}"#).unwrap();

        PreferenceStore::new(&path).save(true).await;

        let raw = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("language"));
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_light_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert!(!store.load().await);
        assert!(store.status().is_degraded());

        // A later successful save heals the file and the status
        store.save(true).await;
        assert_eq!(store.status(), PreferenceStatus::Healthy);
        assert!(store.load().await);
    }

    #[tokio::test]
    async fn test_invalid_value_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"darkMode":"yes"}"#).unwrap();

        let store = PreferenceStore::new(&path);
        assert!(matches!(
            store.try_load().await,
            Err(PreferenceError::InvalidValue { .. })
        ));
        assert!(!store.load().await);
        assert!(store.status().is_degraded());
    }

    #[tokio::test]
    async fn test_write_failure_is_observable_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let store = PreferenceStore::new(blocker.join("preferences.json"));
        store.save(true).await;

        assert!(store.status().is_degraded());
    }
}
