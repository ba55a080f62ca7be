//! Sprite mapping: resize resolution and per-pixel palette lookup
//!
//! The pipeline is:
//! 1. Normalize the decoded image to RGB
//! 2. Resolve target dimensions from the requested width/height
//! 3. Resize (delegated to `image::imageops`) when the size changes
//! 4. Map every pixel, row by row, to its nearest palette character

use crate::error::Error;
use crate::grid::PixelGrid;
use crate::palette::Palette;
use crate::progress::{should_report, ProgressEvent, ProgressReporter};
use crate::source::{open_image, resize_rgb, ImageError, ResizeFilter};
use crate::sprite::Sprite;
use image::DynamicImage;
use std::path::Path;

/// Options for a single conversion, built once by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteOptions {
    /// Target width in characters
    pub width: Option<u32>,
    /// Target height in characters
    pub height: Option<u32>,
    /// Derive the missing dimension from the image aspect ratio.
    ///
    /// Only one-dimension requests preserve aspect, and they do so with or
    /// without this flag. With both dimensions given it is ignored.
    pub preserve_aspect: bool,
    /// Resampling filter used when resizing
    pub filter: ResizeFilter,
}

impl SpriteOptions {
    /// True when `preserve_aspect` is set but cannot apply.
    pub fn aspect_ignored(&self) -> bool {
        self.preserve_aspect && self.width.is_some() && self.height.is_some()
    }
}

/// Resolve output dimensions from the requested and natural sizes.
///
/// A single requested dimension scales the other by the natural aspect ratio,
/// truncating toward zero:
///
/// ```
/// use charsprite::mapper::resolve_dimensions;
///
/// assert_eq!(resolve_dimensions(Some(50), None, 100, 50), (50, 25));
/// assert_eq!(resolve_dimensions(None, Some(20), 100, 50), (40, 20));
/// assert_eq!(resolve_dimensions(Some(7), Some(9), 100, 50), (7, 9));
/// assert_eq!(resolve_dimensions(None, None, 100, 50), (100, 50));
/// ```
pub fn resolve_dimensions(
    width: Option<u32>,
    height: Option<u32>,
    natural_width: u32,
    natural_height: u32,
) -> (u32, u32) {
    match (width, height) {
        (None, None) => (natural_width, natural_height),
        (Some(w), None) => (w, scale_dimension(natural_height, w, natural_width)),
        (None, Some(h)) => (scale_dimension(natural_width, h, natural_height), h),
        (Some(w), Some(h)) => (w, h),
    }
}

/// `other * (requested / natural)` in floating point, truncated.
fn scale_dimension(other: u32, requested: u32, natural: u32) -> u32 {
    (other as f64 * (requested as f64 / natural as f64)) as u32
}

/// Map every pixel to its nearest palette character.
///
/// Rows are visited top to bottom and columns left to right. Progress is
/// reported after every tenth row and after the last one.
pub fn build(pixels: &PixelGrid, palette: &Palette, reporter: &dyn ProgressReporter) -> Sprite {
    let total_rows = pixels.height();
    let mut index = palette.index();
    let mut rows = Vec::with_capacity(total_rows as usize);

    reporter.report(ProgressEvent::Started { width: pixels.width(), height: total_rows });

    for (y, row) in pixels.rows().enumerate() {
        let line: String = row.iter().map(|&color| index.nearest(color)).collect();
        rows.push(line);

        let rows_done = y as u32 + 1;
        if should_report(rows_done, total_rows) {
            reporter.report(ProgressEvent::RowsCompleted { rows_done, total_rows });
        }
    }

    tracing::debug!("Mapped {} distinct colors", index.cached());
    Sprite::from_rows(pixels.width(), rows)
}

/// Prepare the pixel grid for a decoded image: RGB conversion and resize.
pub fn prepare_pixels(
    image: &DynamicImage,
    options: &SpriteOptions,
) -> Result<PixelGrid, ImageError> {
    let rgb = image.to_rgb8();
    let (natural_width, natural_height) = rgb.dimensions();

    if options.aspect_ignored() {
        tracing::warn!("--preserve-aspect ignored when both width and height are specified");
    }

    let rgb = if options.width.is_some() || options.height.is_some() {
        let (width, height) =
            resolve_dimensions(options.width, options.height, natural_width, natural_height);
        tracing::debug!(
            "Resizing {}x{} to {}x{} ({:?})",
            natural_width,
            natural_height,
            width,
            height,
            options.filter
        );
        resize_rgb(rgb, width, height, options.filter)?
    } else {
        rgb
    };

    Ok(PixelGrid::from(&rgb))
}

/// Convert a decoded image into a sprite.
pub fn convert(
    image: &DynamicImage,
    palette: &Palette,
    options: &SpriteOptions,
    reporter: &dyn ProgressReporter,
) -> Result<Sprite, ImageError> {
    let pixels = prepare_pixels(image, options)?;
    Ok(build(&pixels, palette, reporter))
}

/// Open an image file and convert it into a sprite.
pub fn convert_file(
    path: &Path,
    palette: &Palette,
    options: &SpriteOptions,
    reporter: &dyn ProgressReporter,
) -> Result<Sprite, Error> {
    let image = open_image(path)?;
    Ok(convert(&image, palette, options, reporter)?)
}
