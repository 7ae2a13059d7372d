//! Site error types

use folio_core::FolioError;
use thiserror::Error;

/// Errors raised while loading configuration or starting the site
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to read a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid TOML or does not match the schema
    #[error("invalid site configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be written back out
    #[error("failed to serialize site configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Error bubbled up from a controller collaborator
    #[error(transparent)]
    Core(#[from] FolioError),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, AppError>;
