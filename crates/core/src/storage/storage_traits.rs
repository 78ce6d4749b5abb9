use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contributions::Contribution;
use crate::errors::Result;
use crate::fundings::Funding;

/// A contribution paired with its parent funding, as returned by
/// contributor lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorEntry {
    pub funding: Funding,
    pub contribution: Contribution,
}

/// Produces a collision-resistant entity id: millisecond timestamp prefix
/// plus a random suffix.
pub fn new_entity_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Contract every persistence backend must satisfy.
///
/// Every operation is async so callers stay portable across backends, even
/// when the active backend could answer synchronously. Read operations
/// degrade to empty results on internal failure; write operations propagate
/// typed errors.
#[async_trait]
pub trait FundingStore: Send + Sync {
    /// Produces a new collision-resistant identifier.
    fn generate_id(&self) -> String {
        new_entity_id()
    }

    /// Upserts a funding by id: overwrite if present, insert otherwise.
    async fn save_funding(&self, funding: Funding) -> Result<()>;

    /// Point lookup. Absence is `Ok(None)`, not an error.
    async fn get_funding(&self, id: &str) -> Result<Option<Funding>>;

    /// Full scan. Ordering is backend-defined: unspecified locally,
    /// newest-created-first remotely.
    async fn get_all_fundings(&self) -> Result<Vec<Funding>>;

    /// Fundings whose host id exactly matches `host_id`.
    async fn get_fundings_by_host(&self, host_id: &str) -> Result<Vec<Funding>>;

    /// Contributions whose contributor name case-insensitively contains
    /// `identifier`, or which are not anonymous, each paired with its parent
    /// funding. Contributions whose parent funding no longer exists are
    /// silently dropped.
    ///
    /// The "or not anonymous" clause is inherited compatibility behavior and
    /// intentionally broad; both backends implement the same rule so they
    /// stay interchangeable.
    async fn get_fundings_by_contributor(&self, identifier: &str)
        -> Result<Vec<ContributorEntry>>;

    /// Records a contribution and atomically increments the parent
    /// funding's `current_amount` by its amount.
    ///
    /// Fails with `Validation` for a non-positive amount and `NotFound` when
    /// the parent funding does not exist; neither failure writes anything.
    /// The contribution insert and the total increment are two separate
    /// steps on every backend; a failure between them leaves the total
    /// behind the recorded contributions and is surfaced to the caller.
    async fn add_contribution(&self, contribution: Contribution) -> Result<()>;

    /// All contributions for a funding. Ordering is unspecified at this
    /// layer; callers sort.
    async fn get_contributions(&self, funding_id: &str) -> Result<Vec<Contribution>>;

    /// Bulk reset: removes every funding and contribution. The only path
    /// that ever deletes ledger records.
    async fn clear_all(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::new_entity_id;

    #[test]
    fn test_entity_id_shape() {
        let id = new_entity_id();
        let (millis, suffix) = id.split_once('-').expect("id has a dash");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn test_entity_ids_do_not_repeat() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| new_entity_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
