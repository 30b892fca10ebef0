use thiserror::Error;

/// Top-level error type for the Winnow assistant.
///
/// Subsystem crates define their own error types for their own taxonomy and
/// convert into or out of `WinnowError` where they share plumbing (config
/// files, serialization, I/O).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WinnowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conversation error: {0}")]
    Conversation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for WinnowError {
    fn from(err: toml::de::Error) -> Self {
        WinnowError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for WinnowError {
    fn from(err: toml::ser::Error) -> Self {
        WinnowError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for WinnowError {
    fn from(err: serde_json::Error) -> Self {
        WinnowError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Winnow operations.
pub type Result<T> = std::result::Result<T, WinnowError>;
