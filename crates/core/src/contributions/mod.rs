//! Contributions module - domain models.

mod contributions_model;

pub use contributions_model::{Contribution, ContributionView, NewContribution, PaymentMethod};
