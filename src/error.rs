//! Error types for the bracket colorizer

use thiserror::Error;

/// Result type alias for colorizer operations
pub type Result<T> = std::result::Result<T, ColorizerError>;

/// Top-level colorizer errors
#[derive(Error, Debug)]
pub enum ColorizerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No such document: {0}")]
    NoSuchDocument(String),

    #[error("{0}")]
    Usage(String),
}

/// Configuration errors
///
/// Any of these refuses to build settings for a document; nothing is
/// colored until the configuration is fixed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} is not an array")]
    NotArray(String),

    #[error("{0} is not a string")]
    NotString(String),

    #[error("{field} expected at least {expected} entries, actual: {actual}")]
    TooFewEntries {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("{0} needs at least 2 characters")]
    BracketsTooShort(String),

    #[error("{0} has no colors")]
    NoColors(String),

    #[error("no bracket pairs configured")]
    NoBracketPairs,

    #[error("invalid bracket pattern: {0}")]
    Pattern(#[from] regex::Error),
}
