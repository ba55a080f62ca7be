//! Character sprite value type

/// Grid of display characters, one string per row.
///
/// Every row holds the same number of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    rows: Vec<String>,
}

impl Sprite {
    /// Construct a sprite from rows already known to share `width` characters.
    pub(crate) fn from_rows(width: u32, rows: Vec<String>) -> Self {
        debug_assert!(rows.iter().all(|r| r.chars().count() == width as usize));
        Self { width, rows }
    }

    /// Width in characters
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Render as newline-terminated lines with no header or footer.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows.iter().map(|r| r.len() + 1).sum());
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}
