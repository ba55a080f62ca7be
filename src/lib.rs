//! charsprite - Library for converting images into character sprites
//!
//! This library provides functionality to:
//! - Parse palette files mapping display characters to RGB colors
//! - Find the nearest palette color for any pixel (Euclidean RGB distance)
//! - Resize decoded images and map them row by row into a character grid
//! - Write the resulting sprite as plain text

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod mapper;
pub mod output;
pub mod palette;
pub mod progress;
pub mod source;
pub mod sprite;

pub use error::{Error, Result};
