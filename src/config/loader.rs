use super::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Load configuration from file or return defaults
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::debug!("Loaded config from {:?}", config_path);
        Ok(config)
    } else {
        // Create default config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Config::default())
    }
}

/// Get the path to the config file
fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "riskbrief")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.config/riskbrief/config.toml"))
}
