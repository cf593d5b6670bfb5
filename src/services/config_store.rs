// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::ThresholdConfig;

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("styloscope"))
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration from file. Threshold values are re-validated so a
    /// hand-edited file with out-of-range numbers is rejected here rather
    /// than deep inside classification.
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;

        config
            .thresholds
            .validate()
            .map_err(|e| format!("Invalid stored config: {}", e))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        config
            .thresholds
            .validate()
            .map_err(|e| format!("Refusing to store config: {}", e))?;

        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content)
            .map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Load just the thresholds, falling back to defaults when no config
    /// file exists.
    pub fn load_thresholds(&self) -> Result<ThresholdConfig, String> {
        Ok(self.load()?.thresholds)
    }

    /// Persist new thresholds, keeping the rest of the config intact.
    pub fn save_thresholds(&self, thresholds: &ThresholdConfig) -> Result<(), String> {
        let mut config = self.load()?;
        config.thresholds = *thresholds;
        self.save(&config)
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)
            .map_err(|e| format!("Failed to create backup dir: {}", e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)?;

        Ok(())
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &PathBuf, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Sort by modification time (oldest first)
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        // Remove oldest entries
        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.thresholds.cv_threshold, 0.25);
        assert_eq!(config.thresholds.metadiscourse_threshold, 8.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            version: "1".to_string(),
            thresholds: ThresholdConfig::new(0.3, 0.5, 9.0).unwrap(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.thresholds.cv_threshold, 0.3);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn test_save_rejects_invalid_thresholds() {
        let store = ConfigStore::new(std::env::temp_dir().join("styloscope-test-reject"));
        let mut config = AppConfig::default();
        config.thresholds.cv_threshold = -1.0;
        assert!(store.save(&config).is_err());
    }
}
