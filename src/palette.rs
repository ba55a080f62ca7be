//! Palette parsing and nearest-color lookup
//!
//! A palette file holds one `<char> <hex>` association per line:
//!
//! ```text
//! # dark outline
//! 0 #000000
//! 1 #FFD700
//! 9 8B4513
//! ```
//!
//! Lines starting with `#` and blank lines are ignored. Malformed lines are
//! skipped with a warning and parsing continues.
//!
//! # Example
//!
//! ```
//! use charsprite::color::Color;
//! use charsprite::palette::parse_palette;
//!
//! let parsed = parse_palette("0 #000000\n1 #FFFFFF\n").unwrap();
//! assert!(parsed.warnings.is_empty());
//! assert_eq!(parsed.palette.nearest(Color::new(10, 10, 10)), '0');
//! ```

use crate::color::{Color, ColorError};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading a palette
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The palette file does not exist
    #[error("Palette file '{}' not found", .path.display())]
    NotFound { path: PathBuf },
    /// Any other I/O failure while reading the palette
    #[error("Error loading palette '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No valid entries were found
    #[error("Palette is empty")]
    Empty,
}

/// Why a palette line was skipped or flagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Line did not split into exactly two tokens
    TokenCount(usize),
    /// Display token is not a single character
    NotSingleChar(String),
    /// Hex color could not be decoded
    InvalidColor { value: String, error: ColorError },
    /// Color was already defined; the new character replaced the old one
    DuplicateColor { color: Color, previous: char, replacement: char },
}

/// Warning produced while parsing a palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteWarning {
    /// 1-based line number in the source text
    pub line: usize,
    pub kind: WarningKind,
}

impl std::fmt::Display for PaletteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::TokenCount(n) => {
                write!(f, "Invalid line {}: expected 2 tokens, found {}", self.line, n)
            }
            WarningKind::NotSingleChar(token) => {
                write!(
                    f,
                    "Invalid character on line {}: '{}' is not a single character",
                    self.line, token
                )
            }
            WarningKind::InvalidColor { value, error } => {
                write!(f, "Invalid hex color on line {}: {} ({})", self.line, value, error)
            }
            WarningKind::DuplicateColor { color, previous, replacement } => write!(
                f,
                "Duplicate color on line {}: {} was '{}', now '{}'",
                self.line, color, previous, replacement
            ),
        }
    }
}

/// A single color-to-character association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Color,
    pub ch: char,
}

/// Non-empty ordered set of palette entries with unique colors.
///
/// Entries keep their insertion order, which decides exact distance ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from entries in order.
    ///
    /// A repeated color keeps its first position and takes the last character.
    pub fn from_entries<I>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = PaletteEntry>,
    {
        let mut builder = PaletteBuilder::default();
        for entry in entries {
            builder.insert(entry);
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Display characters in insertion order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|e| e.ch)
    }

    pub fn get(&self, color: Color) -> Option<char> {
        self.entries.iter().find(|e| e.color == color).map(|e| e.ch)
    }

    /// Entry closest to `color` by Euclidean RGB distance.
    ///
    /// Linear scan in insertion order; on an exact tie the earlier entry wins.
    pub fn nearest_entry(&self, color: Color) -> &PaletteEntry {
        let mut best = &self.entries[0];
        let mut best_distance = color.distance_squared(best.color);

        for entry in &self.entries[1..] {
            if best_distance == 0 {
                break;
            }
            let distance = color.distance_squared(entry.color);
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }

        best
    }

    /// Character of the entry closest to `color`.
    pub fn nearest(&self, color: Color) -> char {
        self.nearest_entry(color).ch
    }

    /// Wrap this palette in a memoizing lookup.
    pub fn index(&self) -> PaletteIndex<'_> {
        PaletteIndex::new(self)
    }
}

/// Memoized nearest-color lookup over a [`Palette`].
///
/// Images usually have far fewer distinct colors than pixels, so exact
/// repeats are answered from a cache. Answers are identical to
/// [`Palette::nearest`].
#[derive(Debug)]
pub struct PaletteIndex<'a> {
    palette: &'a Palette,
    cache: HashMap<Color, char>,
}

impl<'a> PaletteIndex<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette, cache: HashMap::new() }
    }

    pub fn nearest(&mut self, color: Color) -> char {
        let palette = self.palette;
        *self.cache.entry(color).or_insert_with(|| palette.nearest(color))
    }

    /// Number of distinct colors looked up so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }
}

/// Result of parsing a palette
#[derive(Debug, Clone)]
pub struct ParsedPalette {
    pub palette: Palette,
    /// Warnings for skipped or overridden lines, in file order
    pub warnings: Vec<PaletteWarning>,
}

#[derive(Debug, Default)]
struct PaletteBuilder {
    entries: Vec<PaletteEntry>,
    positions: HashMap<Color, usize>,
}

impl PaletteBuilder {
    /// Insert an entry, returning the replaced character for a duplicate color.
    fn insert(&mut self, entry: PaletteEntry) -> Option<char> {
        match self.positions.get(&entry.color) {
            Some(&idx) => {
                let previous = self.entries[idx].ch;
                self.entries[idx].ch = entry.ch;
                Some(previous)
            }
            None => {
                self.positions.insert(entry.color, self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    fn finish(self) -> Result<Palette, PaletteError> {
        if self.entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Palette { entries: self.entries })
    }
}

/// Parse a single non-comment line into an entry.
fn parse_line(line: &str) -> Result<PaletteEntry, WarningKind> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(WarningKind::TokenCount(tokens.len()));
    }

    let mut chars = tokens[0].chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(WarningKind::NotSingleChar(tokens[0].to_string())),
    };

    let color = Color::from_hex(tokens[1])
        .map_err(|error| WarningKind::InvalidColor { value: tokens[1].to_string(), error })?;

    Ok(PaletteEntry { color, ch })
}

/// Parse palette text.
///
/// Skipped lines are reported in [`ParsedPalette::warnings`] and logged.
/// Fails with [`PaletteError::Empty`] when no line yields an entry.
pub fn parse_palette(text: &str) -> Result<ParsedPalette, PaletteError> {
    let mut builder = PaletteBuilder::default();
    let mut warnings = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let kind = match parse_line(line) {
            Ok(entry) => match builder.insert(entry) {
                Some(previous) => WarningKind::DuplicateColor {
                    color: entry.color,
                    previous,
                    replacement: entry.ch,
                },
                None => continue,
            },
            Err(kind) => kind,
        };

        let warning = PaletteWarning { line: idx + 1, kind };
        tracing::warn!("{}", warning);
        warnings.push(warning);
    }

    Ok(ParsedPalette { palette: builder.finish()?, warnings })
}

/// Load and parse a palette file.
pub fn load_palette(path: &Path) -> Result<ParsedPalette, PaletteError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PaletteError::NotFound { path: path.to_path_buf() },
        _ => PaletteError::Read { path: path.to_path_buf(), source },
    })?;

    let parsed = parse_palette(&text)?;
    tracing::info!("Loaded palette with {} colors", parsed.palette.len());
    Ok(parsed)
}
