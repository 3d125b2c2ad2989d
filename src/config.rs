use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

fn default_cue_volume() -> f32 {
    0.3
}

fn default_cue_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether to sound the cue on each drawn sign
    #[serde(default = "default_cue_enabled")]
    pub cue_enabled: bool,

    /// Cue playback volume (0.0-1.0)
    #[serde(default = "default_cue_volume")]
    pub cue_volume: f32,

    /// Optional path to a custom cue audio file (mp3/wav). When unset, a
    /// short synthesized tone is used.
    #[serde(default)]
    pub cue_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cue_enabled: true,
            cue_volume: 0.3,
            cue_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates the default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::LoadFailed {
                path: config_path.display().to_string(),
                source: Box::new(e),
            })?;
            let config: Config =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(e),
                })?;
            tracing::info!("Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&config_path, json).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Get the config file path in the user-writable config directory
    fn config_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or_else(|| ConfigError::LoadFailed {
            path: "<config dir>".to_string(),
            source: "Could not determine user config directory".into(),
        })?;
        Ok(base.join("PitchSigns").join("config.json"))
    }

    /// Get the config directory path (for display purposes)
    pub fn config_dir_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.cue_enabled);
        assert_eq!(config.cue_volume, 0.3);
        assert!(config.cue_file.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.cue_enabled, config.cue_enabled);
        assert_eq!(deserialized.cue_volume, config.cue_volume);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.cue_enabled);
        assert_eq!(config.cue_volume, 0.3);
    }
}
