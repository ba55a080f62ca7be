//! Row-major grid of RGB pixels

use crate::color::Color;
use image::RgbImage;

/// Decoded pixels, already normalized to 3-channel RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Build a grid from rows of equal length.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if rows.iter().any(|r| r.len() as u32 != width) {
            return None;
        }
        Some(Self { width, height, pixels: rows.into_iter().flatten().collect() })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Iterate rows top to bottom
    ///
    /// Always yields `height` rows, including when the grid is zero pixels wide.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        let width = self.width as usize;
        (0..self.height as usize).map(move |y| &self.pixels[y * width..(y + 1) * width])
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(img: &RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Color::from(*p)).collect(),
        }
    }
}
