use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

use super::fundings_model::{Funding, NewFunding};
use super::fundings_traits::FundingServiceTrait;
use crate::contributions::{Contribution, NewContribution};
use crate::errors::Result;
use crate::payments::{PaymentGatewayTrait, PaymentRequest};
use crate::storage::{ContributorEntry, FundingStore};
use crate::Error;

/// A recorded contribution together with its payment transaction id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReceipt {
    pub contribution: Contribution,
    pub transaction_id: String,
}

/// Service orchestrating funding creation and payment-gated contributions
/// over whichever store is active.
pub struct FundingService {
    store: Arc<dyn FundingStore>,
    gateway: Arc<dyn PaymentGatewayTrait>,
}

impl FundingService {
    pub fn new(store: Arc<dyn FundingStore>, gateway: Arc<dyn PaymentGatewayTrait>) -> Self {
        Self { store, gateway }
    }
}

#[async_trait]
impl FundingServiceTrait for FundingService {
    /// Validates and persists a new funding with a fresh id, a zero total,
    /// and active status.
    async fn create_funding(&self, new_funding: NewFunding) -> Result<Funding> {
        new_funding.validate()?;
        let id = new_funding
            .id
            .clone()
            .unwrap_or_else(|| self.store.generate_id());
        debug!("Creating funding {} for host {}", id, new_funding.host_id);
        let funding = new_funding.into_funding(id, Utc::now());
        self.store.save_funding(funding.clone()).await?;
        Ok(funding)
    }

    /// Takes a payment through the gateway and, only on success, records the
    /// contribution. The store's `add_contribution` is the sole writer of
    /// the funding's `current_amount`.
    async fn contribute(&self, new_contribution: NewContribution) -> Result<ContributionReceipt> {
        new_contribution.validate()?;

        let response = self
            .gateway
            .process_payment(PaymentRequest {
                amount: new_contribution.amount,
                method: new_contribution.payment_method,
                contributor_name: new_contribution.contributor_name.clone(),
            })
            .await;

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| "Payment declined".to_string());
            warn!(
                "Payment declined for funding {}: {}",
                new_contribution.funding_id, reason
            );
            return Err(Error::Payment(reason));
        }
        let transaction_id = response
            .transaction_id
            .ok_or_else(|| Error::Unexpected("Payment succeeded without a transaction id".to_string()))?;

        let contribution =
            new_contribution.into_contribution(self.store.generate_id(), Utc::now());
        self.store.add_contribution(contribution.clone()).await?;

        Ok(ContributionReceipt {
            contribution,
            transaction_id,
        })
    }

    async fn get_funding(&self, id: &str) -> Result<Option<Funding>> {
        self.store.get_funding(id).await
    }

    async fn get_all_fundings(&self) -> Result<Vec<Funding>> {
        self.store.get_all_fundings().await
    }

    async fn get_fundings_by_host(&self, host_id: &str) -> Result<Vec<Funding>> {
        self.store.get_fundings_by_host(host_id).await
    }

    async fn get_fundings_by_contributor(
        &self,
        identifier: &str,
    ) -> Result<Vec<ContributorEntry>> {
        self.store.get_fundings_by_contributor(identifier).await
    }

    async fn get_contributions(&self, funding_id: &str) -> Result<Vec<Contribution>> {
        self.store.get_contributions(funding_id).await
    }
}
