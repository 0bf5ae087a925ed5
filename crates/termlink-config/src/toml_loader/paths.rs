//! Where the config file lives, and writing the commented default.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use termlink_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "termlink";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/termlink/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories. An existing file is left untouched.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_error("create config directory", parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            info!("config already exists at {}, not overwriting", path.display());
            return Ok(());
        }
        Err(e) => return Err(io_error("create config file", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error("write default config", path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}
