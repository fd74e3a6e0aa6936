//! Configuration types.
//!
//! Configuration is read from a TOML file in the user's config directory.
//! Every field has a default, so a missing file yields a working setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Class lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Scheduling form settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load from the default config path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Class lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Quiet period after the last keystroke before a search fires, in ms.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum search-term length; shorter terms never reach the directory.
    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_search_len: default_min_search_len(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_search_len() -> usize {
    3
}

/// Scheduling form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum length of an anonymous code block.
    #[serde(default = "default_max_code_length")]
    pub max_code_length: usize,

    /// Default minutes between batch job reschedules.
    #[serde(default = "default_reschedule_interval")]
    pub default_reschedule_interval: u32,

    /// Minutes added to "now" for the default start time.
    #[serde(default = "default_start_lead_minutes")]
    pub start_lead_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_code_length: default_max_code_length(),
            default_reschedule_interval: default_reschedule_interval(),
            start_lead_minutes: default_start_lead_minutes(),
        }
    }
}

fn default_max_code_length() -> usize {
    13000
}

fn default_reschedule_interval() -> u32 {
    5
}

fn default_start_lead_minutes() -> i64 {
    5
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("schedulomatic"))
}

/// Get the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.lookup.debounce_ms, 300);
        assert_eq!(config.lookup.min_search_len, 3);
        assert_eq!(config.scheduler.max_code_length, 13000);
        assert_eq!(config.scheduler.default_reschedule_interval, 5);
        assert_eq!(config.scheduler.start_lead_minutes, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup]\ndebounce_ms = 150\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.lookup.debounce_ms, 150);
        // Unspecified fields keep their defaults
        assert_eq!(config.lookup.min_search_len, 3);
        assert_eq!(config.scheduler.max_code_length, 13000);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
