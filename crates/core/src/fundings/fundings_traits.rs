use async_trait::async_trait;

use crate::contributions::{Contribution, NewContribution};
use crate::errors::Result;
use crate::fundings::{Funding, NewFunding};
use crate::storage::ContributorEntry;

use super::fundings_service::ContributionReceipt;

/// Trait for funding service operations.
#[async_trait]
pub trait FundingServiceTrait: Send + Sync {
    async fn create_funding(&self, new_funding: NewFunding) -> Result<Funding>;
    async fn contribute(&self, new_contribution: NewContribution) -> Result<ContributionReceipt>;
    async fn get_funding(&self, id: &str) -> Result<Option<Funding>>;
    async fn get_all_fundings(&self) -> Result<Vec<Funding>>;
    async fn get_fundings_by_host(&self, host_id: &str) -> Result<Vec<Funding>>;
    async fn get_fundings_by_contributor(&self, identifier: &str)
        -> Result<Vec<ContributorEntry>>;
    async fn get_contributions(&self, funding_id: &str) -> Result<Vec<Contribution>>;
}
