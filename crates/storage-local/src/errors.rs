//! Storage-specific error types for the local JSON store.
//!
//! These wrap filesystem and serialization failures and convert them to the
//! backend-agnostic error types defined in `giftpool_core` before being
//! returned to callers.

use thiserror::Error;

use giftpool_core::errors::{Error, PersistenceError};

/// Internal errors of the local storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Persistence(PersistenceError::Io(e.to_string())),
            StorageError::Serialization(e) => {
                Error::Persistence(PersistenceError::Serialization(e.to_string()))
            }
        }
    }
}
