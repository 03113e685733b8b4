use thiserror::Error;

/// Top-level error type for the Gridwork workspace.
///
/// Subsystem crates define their own error types and implement
/// `From<GridworkError>` so that the `?` operator works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridworkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GridworkError {
    fn from(err: toml::de::Error) -> Self {
        GridworkError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for GridworkError {
    fn from(err: toml::ser::Error) -> Self {
        GridworkError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GridworkError {
    fn from(err: serde_json::Error) -> Self {
        GridworkError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Gridwork operations.
pub type Result<T> = std::result::Result<T, GridworkError>;
