//! File and text utility functions.

use crate::config::TextEncoding;
use crate::error::{BestiaryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively find files with given extension in a directory.
pub fn find_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(BestiaryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory not found: {}", dir.display()),
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Some(ext) = entry.path().extension() {
                if ext == extension {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read file with Latin1 encoding (Windows-1252).
pub fn read_latin1_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    // Every byte maps to a character in Windows-1252, so decoding cannot fail.
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
    Ok(text.into_owned())
}

/// Read file with UTF-8 encoding.
pub fn read_utf8_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn read_text_file(path: &Path, encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => read_utf8_file(path),
        TextEncoding::Latin1 => read_latin1_file(path),
    }
}

/// Split stat-block text into its header and body lines.
///
/// Lines are trimmed, internal whitespace runs (including non-breaking
/// spaces) collapse to one space, and blank lines are dropped.
pub fn split_stat_block_text(text: &str) -> Result<(String, Vec<String>)> {
    let mut lines = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty());

    let header = lines.next().ok_or(BestiaryError::EmptyStatBlock)?;
    Ok((header, lines.collect()))
}
