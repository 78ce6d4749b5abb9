//! Core error types for the funding ledger.
//!
//! This module defines backend-agnostic error types. Storage-specific errors
//! (filesystem, HTTP transport, etc.) are converted to these types by the
//! storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the funding ledger.
///
/// Read operations degrade to empty results inside the backends, so callers
/// mostly see these errors from write paths.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation referenced a funding or contribution id that does not
    /// exist. Absence on a point lookup is `Ok(None)`, not this error.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence operation failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Remote storage operation failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input. Always rejected before any write.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

/// Errors from the process-local durable store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage medium unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the hosted table store, carrying the backend's message.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Persistence(PersistenceError::Io(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Persistence(PersistenceError::Serialization(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
