//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use geolog_types::{Coordinates, PermissionState};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Location database path (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Preference file path (defaults to the platform config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PathBuf>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Remembered answer to the location permission prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionState>,

    /// Position reported when capturing without `--lat`/`--lon`
    #[serde(default)]
    pub location: LocationConfig,
}

/// The fix served by the terminal location provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Random offset in degrees applied to each component of every fix.
    #[serde(default)]
    pub jitter: f64,
}

impl LocationConfig {
    /// The configured fix, if both components are set.
    pub fn fix(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geolog")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found or unreadable
    pub fn load(path: &Path) -> Self {
        let (config, problem) = Self::load_checked(path);
        if let Some(problem) = problem {
            warn!("{}", problem);
        }
        config
    }

    /// Like [`Config::load`], but hands back the load problem instead of
    /// logging it, for callers that read the config before logging is set up.
    pub fn load_checked(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => (config, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("Failed to parse config {}: {}", path.display(), e)),
                ),
            },
            Err(e) => (
                Self::default(),
                Some(format!("Failed to read config {}: {}", path.display(), e)),
            ),
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Database path: explicit flag, then config, then platform default.
    pub fn database_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(geolog_store::default_db_path)
    }

    /// Preference file path: config, then platform default.
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences
            .clone()
            .unwrap_or_else(geolog_core::default_preferences_path)
    }
}

/// Record the answer to the permission prompt, keeping the rest of the file.
pub fn update_permission(path: &Path, state: PermissionState) -> Result<()> {
    let mut config = Config::load(path);
    config.permission = Some(state);
    config.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert!(config.location.fix().is_none());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database = [not toml").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_load_checked_reports_problem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::load_checked(&path).1.is_none());

        fs::write(&path, "no_color = \"maybe\"").unwrap();
        let (config, problem) = Config::load_checked(&path);
        assert_eq!(config, Config::default());
        assert!(problem.unwrap().contains("Failed to parse config"));
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            database = "/tmp/geolog/locations.sqlite"
            no_color = true
            permission = "granted"

            [location]
            latitude = 37.7749
            longitude = -122.4194
            jitter = 0.001
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database.as_deref(),
            Some(Path::new("/tmp/geolog/locations.sqlite"))
        );
        assert!(config.no_color);
        assert_eq!(config.permission, Some(PermissionState::Granted));
        assert_eq!(
            config.location.fix(),
            Some(Coordinates::new(37.7749, -122.4194))
        );
        assert_eq!(config.location.jitter, 0.001);
    }

    #[test]
    fn test_fix_requires_both_components() {
        let location = LocationConfig {
            latitude: Some(1.0),
            ..Default::default()
        };
        assert!(location.fix().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            preferences: Some(dir.path().join("preferences.json")),
            location: LocationConfig {
                latitude: Some(40.7128),
                longitude: Some(-74.006),
                jitter: 0.0,
            },
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path), config);
    }

    #[test]
    fn test_update_permission_keeps_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "no_color = true\n").unwrap();

        update_permission(&path, PermissionState::Denied).unwrap();

        let config = Config::load(&path);
        assert!(config.no_color);
        assert_eq!(config.permission, Some(PermissionState::Denied));
        assert!(fs::read_to_string(&path).unwrap().contains("permission = \"denied\""));
    }

    #[test]
    fn test_database_path_precedence() {
        let config = Config {
            database: Some(PathBuf::from("/from/config.sqlite")),
            ..Default::default()
        };
        assert_eq!(
            config.database_path(Some(Path::new("/from/flag.sqlite"))),
            PathBuf::from("/from/flag.sqlite")
        );
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/from/config.sqlite")
        );
    }
}
