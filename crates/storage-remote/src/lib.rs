//! Remote storage implementation for the giftpool funding ledger.
//!
//! This crate implements the `FundingStore` contract over two relational
//! tables (`fundings`, `contributions`) reached through a PostgREST-style
//! HTTP data API. It owns the translation between the domain model's
//! camelCase fields and the storage schema's snake_case columns, and it
//! delegates the contribution total to the server-side
//! `increment_funding_amount` stored procedure so concurrent contributions
//! from different clients never lose an increment.
//!
//! This crate is the only place in the workspace that speaks HTTP; everything
//! else works against the `FundingStore` trait.

mod model;
mod store;

pub use model::{ContributionRow, FundingRow};
pub use store::RemoteStore;

// Re-export from giftpool-core for convenience
pub use giftpool_core::errors::{Error, RemoteError, Result};
