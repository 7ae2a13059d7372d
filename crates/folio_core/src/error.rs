//! Core error types

use thiserror::Error;

/// Errors raised by folio controllers and their collaborators.
///
/// None of these are fatal for a page: callers log them and keep going with
/// in-memory state.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Preference storage cannot be reached (disabled, denied, corrupt)
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A preference write was refused by the backend
    #[error("failed to store preference `{key}`: {reason}")]
    StorageWrite { key: String, reason: String },

    /// A value outside of a closed enumeration (scheme, accent color)
    #[error("unrecognized {kind} value `{value}`")]
    InvalidValue { kind: &'static str, value: String },
}

impl FolioError {
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, FolioError>;
