//! Image acquisition: decoding, RGB normalization and resampling
//!
//! Decoding and interpolation are delegated to the `image` crate. The core
//! only ever sees 3-channel RGB buffers produced here.

use clap::ValueEnum;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error acquiring or preparing the input image
#[derive(Debug, Error)]
pub enum ImageError {
    /// The image file does not exist
    #[error("Image file '{}' not found", .path.display())]
    NotFound { path: PathBuf },
    /// Decoding or any other image failure
    #[error("Error processing image: {0}")]
    Processing(#[from] image::ImageError),
    /// A requested or derived dimension came out as zero
    #[error("Error processing image: cannot resize to {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// Resampling filter used when resizing.
///
/// | Filter | Quality | Notes |
/// |--------|---------|-------|
/// | `nearest` | Blocky | Keeps hard pixel edges |
/// | `triangle` | Soft | Bilinear |
/// | `catmull-rom` | Sharp | Bicubic |
/// | `gaussian` | Soft | |
/// | `lanczos3` | Best | Default, photographic input |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    #[serde(rename = "catmull-rom")]
    #[value(name = "catmull-rom")]
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Open and decode an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage, ImageError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(image::ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(ImageError::NotFound { path: path.to_path_buf() })
        }
        Err(e) => Err(ImageError::Processing(e)),
    }
}

/// Resize an RGB buffer to exactly `width`x`height`.
///
/// Returns the input untouched when it already has that size.
pub fn resize_rgb(
    img: RgbImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<RgbImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::ZeroDimension { width, height });
    }
    if img.dimensions() == (width, height) {
        return Ok(img);
    }
    Ok(image::imageops::resize(&img, width, height, filter.into()))
}
