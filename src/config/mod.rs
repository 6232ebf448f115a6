mod loader;

pub use loader::{load_config, load_config_from};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "riskbrief")
        .map(|dirs| dirs.data_dir().join("store.db"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/riskbrief/store.db"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Store path with `~` expanded
    pub fn resolved_path(&self) -> PathBuf {
        expand_path(&self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    /// Write the artifact to stdout instead of a file
    #[serde(default)]
    pub stdout: bool,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            stdout: false,
        }
    }
}

impl OutputConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        expand_path(&self.directory)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_mask_credential")]
    pub mask_credential: bool,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_mask_credential() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            mask_credential: default_mask_credential(),
        }
    }
}

fn expand_path(path: &std::path::Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).to_string())
}
