//! Watch module - polling read model for funding pages.

mod funding_watcher;

pub use funding_watcher::{FundingSnapshot, FundingWatcher, DEFAULT_POLL_INTERVAL};
