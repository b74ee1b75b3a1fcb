use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use skillchat_types::{ChatError, API_KEY_PREFIX};

/// Persisted settings values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Provider credential; must start with the `sk-ant-` prefix to be accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Skill id pre-selected after every catalog refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_skill: Option<String>,
}

impl SettingsConfig {
    /// Load settings from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SettingsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save settings to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Settings store that handles loading, validated mutation, and persistence.
///
/// Values survive across sessions; every successful `set_*` writes the file
/// immediately. A rejected value is reported to the caller and never
/// persisted.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    config: SettingsConfig,
    settings_file: Option<PathBuf>,
}

impl SettingsStore {
    /// Create an in-memory store with empty settings and no backing file
    pub fn new() -> Self {
        Self { config: SettingsConfig::default(), settings_file: None }
    }

    /// Create a store backed by a file, loading it if it exists
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let config = if path_buf.exists() {
            SettingsConfig::load_from_file(&path_buf)?
        } else {
            SettingsConfig::default()
        };
        Ok(Self { config, settings_file: Some(path_buf) })
    }

    pub fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    pub fn default_skill(&self) -> Option<&str> {
        self.config.default_skill.as_deref()
    }

    /// Save the credential. Fails validation without persisting anything
    /// unless the value carries the provider prefix.
    pub fn set_api_key(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ChatError::Validation("API key is required".to_string()).into());
        }
        if !value.starts_with(API_KEY_PREFIX) {
            return Err(ChatError::Validation(format!(
                "invalid API key format, expected a key starting with \"{}\"",
                API_KEY_PREFIX
            ))
            .into());
        }
        self.config.api_key = Some(value.to_string());
        self.persist()
    }

    /// Save the default-skill id. Free-form; membership is only checked
    /// against the catalog at use time. An empty value clears the default.
    pub fn set_default_skill(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        self.config.default_skill =
            if value.is_empty() { None } else { Some(value.to_string()) };
        self.persist()
    }

    pub fn settings_file(&self) -> Option<&Path> {
        self.settings_file.as_deref()
    }

    fn persist(&self) -> Result<()> {
        if let Some(ref path) = self.settings_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.config.save_to_file(path)?;
        }
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
