//! Configuration management for placement-tracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::format_date;
use crate::store::{StoreOptions, DEFAULT_SLOT_KEY};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "placement-tracker";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "tracker.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PLACEMENT_TRACKER_`)
/// 2. TOML config file at `~/.config/placement-tracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Tracker behaviour.
    pub tracker: TrackerConfig,
    /// Output formatting.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/placement-tracker/tracker.db`
    pub database_path: Option<PathBuf>,
    /// Slot key the applications are stored under.
    pub slot_key: String,
}

/// Tracker behaviour configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Seed example applications the first time the tracker runs.
    pub seed_examples: bool,
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `strftime` format for applied dates in tables.
    pub date_format: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed_examples: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PLACEMENT_TRACKER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(Error::config_validation("storage.slot_key must not be empty"));
        }

        if self.display.date_format.trim().is_empty() {
            return Err(Error::config_validation(
                "display.date_format must not be empty",
            ));
        }

        // Unknown specifiers and time-of-day fields only fail once formatted
        if format_date(NaiveDate::default(), &self.display.date_format).is_err() {
            return Err(Error::config_validation(format!(
                "invalid display.date_format: {}",
                self.display.date_format
            )));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Store options derived from this configuration.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            key: self.storage.slot_key.clone(),
            seed_examples: self.tracker.seed_examples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "placementApplications");
        assert!(config.tracker.seed_examples);
        assert_eq!(config.display.date_format, "%b %-d, %Y");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_empty_date_format() {
        let mut config = Config::default();
        config.display.date_format = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("date_format"));
    }

    #[test]
    fn test_validate_bad_date_specifier() {
        let mut config = Config::default();
        config.display.date_format = "%Q".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid display.date_format"));
    }

    #[test]
    fn test_validate_rejects_time_of_day_specifiers() {
        let mut config = Config::default();
        for pattern in ["%H", "%H:%M", "%Y-%m-%d %I:%M %p"] {
            config.display.date_format = pattern.to_string();
            let err = config.validate().unwrap_err().to_string();
            assert!(err.contains("invalid display.date_format"), "{pattern}");
        }
    }

    #[test]
    fn test_validate_accepts_date_only_formats() {
        let mut config = Config::default();
        for pattern in ["%Y-%m-%d", "%d/%m/%Y", "%A, %B %e"] {
            config.display.date_format = pattern.to_string();
            assert!(config.validate().is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("tracker.db"));
        assert!(path.to_string_lossy().contains("placement-tracker"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_store_options() {
        let mut config = Config::default();
        config.storage.slot_key = "mySlot".to_string();
        config.tracker.seed_examples = false;

        let options = config.store_options();
        assert_eq!(options.key, "mySlot");
        assert!(!options.seed_examples);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("placement-tracker"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "placement_tracker_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[storage]\nslot_key = \"fromFile\"\n\n[tracker]\nseed_examples = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.storage.slot_key, "fromFile");
        assert!(!config.tracker.seed_examples);
        assert_eq!(config.display, DisplayConfig::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let path = std::env::temp_dir().join(format!(
            "placement_tracker_bad_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[storage]\nslot_key = \"\"\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"slot_key": "abc"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.slot_key, "abc");
        assert!(storage.database_path.is_none());
    }
}
