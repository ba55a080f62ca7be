//! Sprite file output

use crate::sprite::Sprite;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// The sprite file could not be created or written
    #[error("Error writing output '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write a sprite as plain text, one line per row.
///
/// Missing parent directories are created. A failure part-way through may
/// leave a partial file behind.
pub fn write_sprite(sprite: &Sprite, path: &Path) -> Result<(), OutputError> {
    write_text(sprite, path)
        .map_err(|source| OutputError::Write { path: path.to_path_buf(), source })
}

fn write_text(sprite: &Sprite, path: &Path) -> io::Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for row in sprite.rows() {
        writer.write_all(row.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
