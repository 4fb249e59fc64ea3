use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::SmartError;

const CONFIG_DIR: &str = "smart-textarea";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load `~/.config/smart-textarea/config.toml`, or defaults when absent
pub fn load_config() -> Result<Config, SmartError> {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, SmartError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };
    parse_config(&contents)
}

pub fn parse_config(content: &str) -> Result<Config, SmartError> {
    toml::from_str(content).map_err(|e| SmartError::Config(e.message().to_string()))
}
