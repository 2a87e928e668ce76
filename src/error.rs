//! Error types for the export engine.
//!
//! Rendering itself never fails on well-formed records; errors come from
//! the output backend, from configuration, or from decoding upstream JSON.

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running an export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (writing the artifact, reading a config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendering backend could not produce a document
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid export configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Upstream resume JSON could not be decoded
    #[error("Invalid resume input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
