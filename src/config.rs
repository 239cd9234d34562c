use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_PATH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog_path: PathBuf,
    /// Fixed clone directory; a fresh temp dir per run when unset.
    pub clone_dir: Option<PathBuf>,
    pub reboot_command: Vec<String>,
    /// Invalid menu answers tolerated before giving up; unlimited when unset.
    pub max_attempts: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            clone_dir: None,
            reboot_command: vec!["reboot".into()],
            max_attempts: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(format!("{home}/.config"))
    }).join("firstboot")
}

pub fn load_settings() -> Settings {
    load_settings_from(&config_dir().join("config.toml"))
}

pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
            log::warn!("ignoring unparsable {}: {e}", path.display());
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}
