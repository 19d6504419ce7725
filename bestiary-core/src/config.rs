//! Extraction run configuration.
//!
//! Supports TOML configuration files like:
//! ```toml
//! [input]
//! extension = "txt"
//! encoding = "latin1"
//!
//! [output]
//! pretty = true
//! ```
//! Every key is optional.

use crate::error::{BestiaryError, Result};
use serde::Deserialize;
use std::path::Path;

/// Encoding of stat-block text files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Windows-1252, as saved by older page dumps.
    Latin1,
}

impl std::str::FromStr for TextEncoding {
    type Err = BestiaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "latin1" | "windows-1252" => Ok(TextEncoding::Latin1),
            other => Err(BestiaryError::Config(format!("Unknown encoding: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Extension scanned for in batch mode, without the dot.
    pub extension: String,
    pub encoding: TextEncoding,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            encoding: TextEncoding::Utf8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

/// Complete configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl ExtractConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BestiaryError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config from {:?}: {}", path, e),
            ))
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BestiaryError::Config(format!("Failed to parse config TOML: {}", e)))
    }
}
