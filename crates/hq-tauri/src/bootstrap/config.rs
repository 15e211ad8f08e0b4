//! # Configuration Loader
//!
//! Pure data loading: read the TOML file and map it to `AppConfig`.
//! No validation and no defaulting of individual keys happens here; missing
//! keys become empty values in `AppConfig::from_toml`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use hq_core::config::AppConfig;

const APP_DIR_NAME: &str = "hq-launcher";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `<platform config dir>/hq-launcher/config.toml`
pub fn resolve_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config at `path`, falling back to defaults when it is absent or
/// unreadable. Startup never fails on configuration.
pub fn load_config_or_default(path: Option<&Path>) -> AppConfig {
    let Some(path) = path else {
        warn!("no platform config directory, using default configuration");
        return AppConfig::default();
    };
    if !path.exists() {
        info!(path = %path.display(), "no config file, using default configuration");
        return AppConfig::default();
    }
    match load_config(path.to_path_buf()) {
        Ok(config) => {
            info!(path = %path.display(), "configuration loaded");
            config
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "failed to load config, using defaults"
            );
            AppConfig::default()
        }
    }
}
