//! Error types for the PassDiff core library.
//!
//! The comparison and merge engines are total and never fail. Errors only
//! surface at the JSON boundary used by the platform bindings.

use thiserror::Error;

/// Errors that can occur at the JSON API boundary.
///
/// This enum is exposed to Swift/Kotlin via UniFFI as a flat error type,
/// meaning the error variants are exposed as simple enum cases with string messages.
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
#[cfg_attr(feature = "uniffi", uniffi(flat_error))]
pub enum PassDiffError {
    /// Error serializing/deserializing JSON
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for PassDiffError {
    fn from(err: serde_json::Error) -> Self {
        PassDiffError::JsonError(err.to_string())
    }
}

/// Result type alias for JSON API operations.
pub type PassDiffResult<T> = Result<T, PassDiffError>;
