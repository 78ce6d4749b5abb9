//! Local storage implementation for the giftpool funding ledger.
//!
//! This crate implements the `FundingStore` contract over two JSON-serialized
//! collections (`fundings.json`, `contributions.json`) in a process-local
//! data directory. It is suitable for offline, single-machine operation:
//! every funding write is a read-modify-write of the whole collection, which
//! is fine at gift-campaign scale but is not linearizable across concurrent
//! processes. Writers inside one process are serialized by an async lock;
//! writers in different processes race with last-write-wins semantics.

pub mod errors;
mod store;

pub use errors::StorageError;
pub use store::LocalStore;

// Re-export from giftpool-core for convenience
pub use giftpool_core::errors::{Error, PersistenceError, Result};
