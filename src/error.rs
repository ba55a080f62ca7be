//! Top-level error type
//!
//! Each module owns its error enum; this wraps them so a whole conversion can
//! be driven with `?`.

use crate::config::ConfigError;
use crate::output::OutputError;
use crate::palette::PaletteError;
use crate::source::ImageError;
use thiserror::Error;

/// Any fatal failure of a conversion run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
