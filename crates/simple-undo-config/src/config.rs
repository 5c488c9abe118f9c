/// Application configuration: load, save and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SIMPLE_UNDO_CONFIG";

const DEFAULT_PROMPT: &str = "> ";

/// Tunables for the undo/redo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Whether `execute` applies the command's forward effect itself.
    /// When false, callers must apply the edit before recording it.
    pub apply_on_execute: bool,
    /// Upper bound on recorded commands. `None` keeps everything.
    pub max_depth: Option<usize>,
    /// Reject state changes while no update observer is registered.
    pub require_observer: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            apply_on_execute: true,
            max_depth: None,
            require_observer: true,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistorySettings,
    /// Content the editable surface starts with.
    pub initial_content: String,
    pub prompt: String,
    /// Print the undo/redo availability after every state change.
    pub show_status_after_each_command: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history: HistorySettings::default(),
            initial_content: String::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            show_status_after_each_command: true,
        }
    }
}

impl AppConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `SIMPLE_UNDO_CONFIG` environment variable
    /// 2. `simple-undo/config.json` under the platform config directory
    /// 3. `simple-undo.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("simple-undo").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("simple-undo.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Broken files are left untouched
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Resets invalid fields.
    pub fn sanitize(&mut self) {
        // A zero-length history could never undo anything
        if self.history.max_depth == Some(0) {
            self.history.max_depth = None;
        }
        if self.prompt.trim().is_empty() {
            self.prompt = DEFAULT_PROMPT.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.history.apply_on_execute);
        assert!(config.history.require_observer);
        assert_eq!(config.history.max_depth, None);
        assert!(config.initial_content.is_empty());
        assert_eq!(config.prompt, "> ");
        assert!(config.show_status_after_each_command);
    }

    #[test]
    fn test_sanitize_drops_zero_depth() {
        let mut config = AppConfig::default();
        config.history.max_depth = Some(0);
        config.sanitize();
        assert_eq!(config.history.max_depth, None);

        config.history.max_depth = Some(3);
        config.sanitize();
        assert_eq!(config.history.max_depth, Some(3));
    }

    #[test]
    fn test_sanitize_resets_blank_prompt() {
        let mut config = AppConfig::default();
        config.prompt = "   ".to_string();
        config.sanitize();
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn test_history_settings_partial_json() {
        let settings: HistorySettings = serde_json::from_str(r#"{"max_depth": 7}"#).unwrap();
        assert_eq!(settings.max_depth, Some(7));
        assert!(settings.apply_on_execute);
        assert!(settings.require_observer);
    }

    #[test]
    fn test_config_path_with_env_var() {
        let original = std::env::var(CONFIG_PATH_ENV).ok();
        std::env::set_var(CONFIG_PATH_ENV, "/custom/undo.json");
        assert_eq!(AppConfig::config_path(), PathBuf::from("/custom/undo.json"));
        match original {
            Some(val) => std::env::set_var(CONFIG_PATH_ENV, val),
            None => std::env::remove_var(CONFIG_PATH_ENV),
        }
    }
}
