//! RGB color value type and hex parsing
//!
//! Palette files describe colors as 6-digit hex (`#RRGGBB` or `RRGGBB`).
//! Distances are plain Euclidean distances in RGB space.

use image::Rgb;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Invalid length (must be exactly 6 hex digits after the optional '#')
    #[error("invalid hex color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// A color represented as 8-bit RGB values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex color with an optional leading `#`.
    ///
    /// ```
    /// use charsprite::color::Color;
    ///
    /// assert_eq!(Color::from_hex("#FFD700").unwrap(), Color::new(255, 215, 0));
    /// assert_eq!(Color::from_hex("8b4513").unwrap(), Color::new(139, 69, 19));
    /// assert!(Color::from_hex("#FFF").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim_start_matches('#');

        // Validate all characters are hex before checking the length so the
        // error names the offending character
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(c));
        }

        if hex.len() != 6 {
            return Err(ColorError::InvalidLength(hex.len()));
        }

        let r = parse_hex_pair(&hex[0..2])?;
        let g = parse_hex_pair(&hex[2..4])?;
        let b = parse_hex_pair(&hex[4..6])?;
        Ok(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance. Orders candidates exactly like [`Color::distance`].
    pub fn distance_squared(self, other: Color) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Color) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<Rgb<u8>> for Color {
    fn from(rgb: Rgb<u8>) -> Self {
        Self { r: rgb[0], g: rgb[1], b: rgb[2] }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parse a single hex digit to its value (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0u8;
    for c in s.chars() {
        value = value * 16 + parse_hex_digit(c)?;
    }
    Ok(value)
}
