//! Fundings module - domain models, services, and traits.

mod fundings_model;
mod fundings_model_tests;
mod fundings_service;
mod fundings_traits;

pub use fundings_model::{
    is_valid_occasion, Funding, FundingStatus, GiftCandidate, NewFunding, Occasion,
    TransparencySettings,
};
pub use fundings_service::{ContributionReceipt, FundingService};
pub use fundings_traits::FundingServiceTrait;
