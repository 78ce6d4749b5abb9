//! Giftpool Core - Domain entities, services, and traits.
//!
//! This crate contains the funding ledger's business logic. It is
//! storage-agnostic and defines the `FundingStore` contract that is
//! implemented by the `storage-local` and `storage-remote` crates.

pub mod contributions;
pub mod errors;
pub mod fundings;
pub mod payments;
pub mod storage;
pub mod users;
pub mod watch;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export the storage contract
pub use storage::{new_entity_id, ContributorEntry, FundingStore};
