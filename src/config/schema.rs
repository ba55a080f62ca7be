//! Configuration schema types for `charsprite.toml`

use crate::mapper::SpriteOptions;
use crate::source::ResizeFilter;
use serde::{Deserialize, Serialize};

/// Resize defaults applied to every conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResizeConfig {
    /// Target width in characters
    #[serde(default)]
    pub width: Option<u32>,
    /// Target height in characters
    #[serde(default)]
    pub height: Option<u32>,
    /// Preserve aspect ratio (only meaningful with a single dimension)
    #[serde(default)]
    pub preserve_aspect: bool,
    /// Resampling filter
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// Full `charsprite.toml` contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteConfig {
    #[serde(default)]
    pub resize: ResizeConfig,
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl SpriteConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.resize.width == Some(0) {
            errors.push(ConfigValidationError {
                field: "resize.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.resize.height == Some(0) {
            errors.push(ConfigValidationError {
                field: "resize.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Options for the mapper, built once per run.
    pub fn sprite_options(&self) -> SpriteOptions {
        SpriteOptions {
            width: self.resize.width,
            height: self.resize.height,
            preserve_aspect: self.resize.preserve_aspect,
            filter: self.resize.filter,
        }
    }
}
