//! Configuration for charsprite
//!
//! Provides types, discovery and loading for the optional `charsprite.toml`
//! file. CLI flags always take precedence over file values.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError,
};
pub use schema::*;
