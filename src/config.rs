//! Application configuration.

use crate::chart::ChartName;
use crate::chart::format::CurrencyFormat;
use crate::consts::dashboard_consts::{engine_wait, refresh};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL the chart endpoints are resolved against.
    pub base_url: String,
    pub refresh_interval_secs: u64,
    pub engine_poll_interval_ms: u64,
    pub engine_max_attempts: u32,
    /// Charts to draw, in order.
    pub charts: Vec<ChartName>,
    pub currency: CurrencyFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval_secs: refresh::INTERVAL_SECS,
            engine_poll_interval_ms: engine_wait::POLL_INTERVAL_MS,
            engine_max_attempts: engine_wait::MAX_ATTEMPTS,
            charts: vec![ChartName::ProfitEvolution],
            currency: CurrencyFormat::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: DashboardConfig = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn engine_poll_interval(&self) -> Duration {
        Duration::from_millis(self.engine_poll_interval_ms)
    }
}

/// Default location of the config file, `~/.profit-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".profit-dashboard").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = DashboardConfig {
            base_url: "http://bets.local".to_string(),
            charts: vec![ChartName::ProfitEvolution, ChartName::RoiBySport],
            ..DashboardConfig::default()
        };
        config.save(&path).unwrap();

        let loaded_config = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = DashboardConfig::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Fields missing from the file fall back to their defaults.
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"charts": ["monthly-summary"], "refresh_interval_secs": 60}"#)
            .unwrap();

        let config = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(config.charts, vec![ChartName::MonthlySummary]);
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.engine_max_attempts, 50);
        assert_eq!(config.engine_poll_interval(), Duration::from_millis(100));
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = DashboardConfig::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // An unknown chart name is rejected rather than silently dropped.
    fn test_load_rejects_unknown_chart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"charts": ["pie-of-doom"]}"#).unwrap();

        assert!(DashboardConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_default_config_path_is_under_home() {
        if let Ok(path) = get_config_path() {
            assert!(path.ends_with(".profit-dashboard/config.json"));
        }
    }
}
