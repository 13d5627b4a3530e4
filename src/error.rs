//! Error types for the Shrike library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`ShrikeError`] enum.

use std::io;

use thiserror::Error;

/// The main error type for cache and full-text operations.
#[derive(Error, Debug)]
pub enum ShrikeError {
    /// I/O errors (snapshot reads).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON errors from snapshot parsing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A full-text init variant was called while the index is live.
    #[error("full-text index already initialized")]
    AlreadyInitialized,

    /// A full-text operation was called before any init variant.
    #[error("full-text index not initialized")]
    NotInitialized,

    /// Bulk initialisation saw a key already present in the store.
    #[error("key collision: {0}")]
    KeyCollision(String),

    /// A mutation would push the index past its word or byte cap.
    #[error("cap exceeded: {0}")]
    CapExceeded(String),

    /// Empty query, empty record key, or an otherwise malformed argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reserved for adapters that need 404-style errors; the in-process
    /// API reports missing records through `Option` instead.
    #[error("not found: {0}")]
    NotFound(String),

    /// Generic error for other cases.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`ShrikeError`].
pub type Result<T> = std::result::Result<T, ShrikeError>;

impl ShrikeError {
    /// Create a new key-collision error.
    pub fn key_collision<S: Into<String>>(msg: S) -> Self {
        ShrikeError::KeyCollision(msg.into())
    }

    /// Create a new cap-exceeded error.
    pub fn cap_exceeded<S: Into<String>>(msg: S) -> Self {
        ShrikeError::CapExceeded(msg.into())
    }

    /// Create a new invalid-input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ShrikeError::InvalidInput(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ShrikeError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ShrikeError::Other(msg.into())
    }
}
