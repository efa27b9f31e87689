//! User settings for FinDash
//!
//! Persisted as config.json in the base directory. Every field has a default,
//! so an empty or missing file means default behavior.

use serde::{Deserialize, Serialize};

use super::paths::FinDashPaths;
use crate::error::{FinDashError, FinDashResult};

/// User settings for FinDash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Freshness window for cached table reads, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Dashboard lookback window when no range is given, in days
    #[serde(default = "default_range_days")]
    pub default_range_days: i64,

    /// How many recent transactions the dashboard shows
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_range_days() -> i64 {
    60
}

fn default_recent_limit() -> usize {
    10
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_range_days: default_range_days(),
            recent_limit: default_recent_limit(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Freshness window as a `Duration`
    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load settings from disk, or defaults if no file exists yet
    pub fn load_or_create(paths: &FinDashPaths) -> FinDashResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinDashError::Io(format!("Failed to read settings file: {}", e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| FinDashError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinDashPaths) -> FinDashResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinDashError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinDashError::Io(format!("Failed to write settings file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cache_ttl_secs, 300);
        assert_eq!(settings.default_range_days, 60);
        assert_eq!(settings.recent_limit, 10);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_range_days = 90;
        settings.recent_limit = 25;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_range_days, 90);
        assert_eq!(loaded.recent_limit, 25);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.cache_ttl_secs, 300);
    }
}
