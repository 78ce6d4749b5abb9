//! User domain models.
//!
//! Authentication is an external capability; the ledger only needs a stable
//! id and display name to attribute fundings and contributions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag distinguishing hosts from plain participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Host,
}

/// Minimal identity record for attribution and ownership checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "userType")]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// True when this user owns the given funding.
    pub fn is_host_of(&self, funding_host_id: &str) -> bool {
        self.id == funding_host_id
    }
}
