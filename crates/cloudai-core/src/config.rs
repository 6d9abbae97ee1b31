use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::theme::Theme;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub reply_delay_ms: Option<u64>,
    #[serde(default)]
    pub toast_duration_ms: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            theme: Some(Theme::Dark.as_str().to_string()),
            reply_delay_ms: None,
            toast_duration_ms: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Update only the theme in the file at `path`, keeping other settings.
    ///
    /// A file that fails to parse is left untouched and the error returned.
    pub fn save_theme(path: &Path, theme: Theme) -> Result<()> {
        let mut config = Self::load_from(path)
            .with_context(|| format!("not overwriting unreadable config {}", path.display()))?;
        config.theme = Some(theme.as_str().to_string());
        config.save_to(path)
    }

    /// Unknown theme names fall back to dark.
    pub fn theme(&self) -> Theme {
        self.theme
            .as_deref()
            .and_then(Theme::from_str)
            .unwrap_or_default()
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms.unwrap_or(DEFAULT_REPLY_DELAY_MS))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("cloudai").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            theme: Some("light".to_string()),
            reply_delay_ms: Some(250),
            toast_duration_ms: None,
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.theme(), Theme::Light);
        assert_eq!(loaded.reply_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "neon" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.reply_delay_ms, None);
    }

    #[test]
    fn test_save_theme_keeps_other_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config {
            theme: Some("dark".to_string()),
            reply_delay_ms: Some(10),
            toast_duration_ms: Some(20),
        }
        .save_to(&path)
        .unwrap();

        Config::save_theme(&path, Theme::Light).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme(), Theme::Light);
        assert_eq!(loaded.reply_delay_ms, Some(10));
        assert_eq!(loaded.toast_duration_ms, Some(20));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_theme_leaves_malformed_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "reply_delay_ms": 10, "#).unwrap();

        assert!(Config::save_theme(&path, Theme::Light).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "reply_delay_ms": 10, "#);
    }
}
