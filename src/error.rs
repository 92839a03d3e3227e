//! Error handling for the interview scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Similarity computation error: {0}")]
    Similarity(String),

    #[error("Keyword matcher error: {0}")]
    Matcher(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ScorerError>;

/// Convert TOML parse errors to our custom error type
impl From<toml::de::Error> for ScorerError {
    fn from(err: toml::de::Error) -> Self {
        ScorerError::Configuration(format!("Failed to parse config: {}", err))
    }
}

/// Convert TOML serialization errors to our custom error type
impl From<toml::ser::Error> for ScorerError {
    fn from(err: toml::ser::Error) -> Self {
        ScorerError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
