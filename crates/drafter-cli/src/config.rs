//! Configuration file discovery for the CLI.
//!
//! Looks for a TOML file at an explicit path, then in the working directory,
//! then in the platform config directory, and falls back to defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use drafter::{DrafterError, config::AppConfig};

const LOCAL_CONFIG: &str = "drafter/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML in `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for DrafterError {
    fn from(err: ConfigError) -> Self {
        DrafterError::Config(err.to_string())
    }
}

/// Find and load the configuration.
///
/// Search order:
/// 1. `explicit_path` if provided
/// 2. `drafter/config.toml` relative to the working directory
/// 3. `config.toml` in the platform config directory
/// 4. [`AppConfig::default`]
///
/// # Errors
///
/// Returns [`DrafterError::Config`] if the explicit path does not exist or a
/// found file is not valid TOML, and [`DrafterError::Io`] if it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DrafterError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = LOCAL_CONFIG; "Loading configuration from local path");
        return load_config_file(local_config);
    }

    match ProjectDirs::from("com", "drafter", "drafter") {
        Some(dirs) => {
            let system_config = dirs.config_dir().join("config.toml");
            if system_config.exists() {
                info!(path = system_config.display().to_string(); "Loading configuration from system path");
                return load_config_file(&system_config);
            }
            debug!(path = system_config.display().to_string(); "System configuration file not found");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, DrafterError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(config)
}
