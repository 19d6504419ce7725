//! Core library for extracting creature records from stat-block text.

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod models;
pub mod parsers;
pub mod vocabulary;

pub use assembler::{StatBlockSections, assemble, extract_lines, extract_sections, extract_text};
pub use error::{BestiaryError, Result};
pub use models::CreatureRecord;
