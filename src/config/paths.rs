//! Path management for FinDash
//!
//! ## Path Resolution Order
//!
//! 1. `FINDASH_DATA_DIR` environment variable (if set)
//! 2. The platform data directory via `directories` (e.g. Linux:
//!    `~/.local/share/findash`, macOS: `~/Library/Application Support/findash`,
//!    Windows: `%APPDATA%\findash\data`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{FinDashError, FinDashResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINDASH_DATA_DIR";

/// Manages all paths used by FinDash
#[derive(Debug, Clone)]
pub struct FinDashPaths {
    /// Base directory for all FinDash data
    base_dir: PathBuf,
}

impl FinDashPaths {
    /// Create a new FinDashPaths instance.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// environment override is not set.
    pub fn new() -> FinDashResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "findash")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    FinDashError::Config("Could not determine a data directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create FinDashPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON table files
    pub fn tables_dir(&self) -> PathBuf {
        self.base_dir.join("tables")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the signed-in session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> FinDashResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinDashError::Io(format!("Failed to create base directory: {}", e)))?;
        std::fs::create_dir_all(self.tables_dir())
            .map_err(|e| FinDashError::Io(format!("Failed to create tables directory: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.tables_dir(), temp_dir.path().join("tables"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinDashPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.tables_dir().exists());
    }
}
