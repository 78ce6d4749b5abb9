//! Users module - minimal identity models.

mod users_model;

pub use users_model::{User, UserRole};
