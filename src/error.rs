//! Error types for cfgtree

use thiserror::Error;

/// Result type alias for cfgtree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cfgtree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("No such key `{0}`")]
    MissingKey(String),

    #[error("Key `{0}` already exists")]
    KeyAlreadyExists(String),

    // -------------------------------------------------------------------------
    // Type Errors
    // -------------------------------------------------------------------------
    #[error(
        "Unsupported type {kind} in {operation}(). Supported types are String, UInt64, Int64, Float64"
    )]
    UnsupportedType { operation: String, kind: String },

    #[error("Cannot read `{path}` as {kind}: invalid value '{value}'")]
    InvalidValue {
        path: String,
        kind: String,
        value: String,
    },

    // -------------------------------------------------------------------------
    // Path Errors
    // -------------------------------------------------------------------------
    #[error("Invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    // -------------------------------------------------------------------------
    // Settings Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

impl Error {
    pub(crate) fn unsupported(operation: &str, kind: impl std::fmt::Display) -> Self {
        Error::UnsupportedType {
            operation: operation.to_string(),
            kind: kind.to_string(),
        }
    }

    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "missing key" error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::MissingKey(_))
    }

    /// Check if this is an overwrite-protection error
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::KeyAlreadyExists(_))
    }

    /// The offending path, when the error concerns one
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MissingKey(path) | Error::KeyAlreadyExists(path) => Some(path),
            Error::InvalidValue { path, .. } | Error::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
