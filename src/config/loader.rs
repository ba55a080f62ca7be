//! Configuration loading and discovery for `charsprite.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpriteConfig;
use crate::source::ResizeFilter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "charsprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse charsprite.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", bullet_list(.0))]
    Validation(Vec<String>),
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n")
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override target width
    pub width: Option<u32>,
    /// Override target height
    pub height: Option<u32>,
    /// Force preserve-aspect on
    pub preserve_aspect: Option<bool>,
    /// Override resampling filter
    pub filter: Option<ResizeFilter>,
}

/// Find charsprite.toml in the current working directory or any ancestor.
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_from(&cwd)
}

/// Find the closest charsprite.toml at or above `start`.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SpriteConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!("Using config {}", p.display());
            load_config_file(&p)
        }
        None => Ok(SpriteConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpriteConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpriteConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. Dimensions are
/// replaced as a pair: a single CLI dimension clears the other one from the
/// file so the aspect ratio is derived from the image.
pub fn merge_cli_overrides(config: &mut SpriteConfig, overrides: &CliOverrides) {
    if overrides.width.is_some() || overrides.height.is_some() {
        config.resize.width = overrides.width;
        config.resize.height = overrides.height;
    }

    if let Some(preserve_aspect) = overrides.preserve_aspect {
        config.resize.preserve_aspect = preserve_aspect;
    }

    if let Some(filter) = overrides.filter {
        config.resize.filter = filter;
    }
}
