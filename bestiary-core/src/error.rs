use thiserror::Error;

#[derive(Error, Debug)]
pub enum BestiaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The header line carrying the creature name and challenge rating
    /// could not be read. Nothing else in the stat block is usable without it.
    #[error("Malformed stat block header: {raw:?}")]
    MalformedHeader { raw: String },

    #[error("Stat block contains no header line")]
    EmptyStatBlock,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BestiaryError>;
