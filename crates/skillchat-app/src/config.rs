use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use skillchat_settings::SettingsStore;

use crate::cli::Cli;

/// Resolved application configuration
pub struct AppConfig {
    pub work_dir: PathBuf,
    pub api_url: String,
    pub settings: SettingsStore,
}

/// Build the application configuration from CLI arguments: resolve the
/// working directory and load (or default) the persisted settings file.
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let work_dir = env::current_dir().context("failed to resolve working directory")?;

    let settings_path = cli
        .settings_file
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| work_dir.join(".skillchat").join("settings.toml"));

    let settings = SettingsStore::from_file(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    Ok(AppConfig {
        work_dir,
        api_url: cli.api_url.clone(),
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_settings_file_flag_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "api_key = \"sk-ant-from-file\"\n").unwrap();

        let cli = Cli::parse_from([
            "skillchat",
            "--settings-file",
            path.to_str().unwrap(),
        ]);
        let config = setup_from_cli(&cli).unwrap();
        assert_eq!(config.settings.api_key(), Some("sk-ant-from-file"));
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
    }
}
