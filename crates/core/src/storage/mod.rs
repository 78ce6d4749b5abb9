//! Storage module - the backend contract every store implements.

mod storage_traits;

pub use storage_traits::{new_entity_id, ContributorEntry, FundingStore};
