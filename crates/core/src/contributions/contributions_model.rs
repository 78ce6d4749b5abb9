//! Contribution domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fundings::TransparencySettings;
use crate::{errors::ValidationError, Error, Result};

/// Payment method used for a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Account,
    Pay,
}

/// A single recorded pledge against a funding.
///
/// Contributions are immutable once recorded: they are never edited or
/// deleted, and they are created only after a successful payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    /// Owning funding, immutable foreign reference.
    pub funding_id: String,
    pub contributor_name: String,
    pub amount: i64,
    #[serde(default)]
    pub message: String,
    pub is_anonymous: bool,
    pub timestamp: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

impl Contribution {
    /// Validates a contribution before it is persisted.
    pub fn validate(&self) -> Result<()> {
        if self.funding_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fundingId".to_string(),
            )));
        }
        if self.amount <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for recording a new contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub funding_id: String,
    pub contributor_name: String,
    pub amount: i64,
    #[serde(default)]
    pub message: String,
    pub is_anonymous: bool,
    pub payment_method: PaymentMethod,
}

impl NewContribution {
    /// Validates the new contribution data.
    pub fn validate(&self) -> Result<()> {
        if self.funding_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fundingId".to_string(),
            )));
        }
        if self.contributor_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "contributorName".to_string(),
            )));
        }
        if self.amount <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be positive".to_string(),
            )));
        }
        Ok(())
    }

    /// Builds the persisted contribution, assigning identity and timestamp.
    pub fn into_contribution(self, id: String, timestamp: DateTime<Utc>) -> Contribution {
        Contribution {
            id,
            funding_id: self.funding_id,
            contributor_name: self.contributor_name,
            amount: self.amount,
            message: self.message,
            is_anonymous: self.is_anonymous,
            timestamp,
            payment_method: self.payment_method,
        }
    }
}

/// Transparency-respecting read shape of a contribution.
///
/// Withheld fields are `None`. The host is exempt from the transparency
/// settings, but an anonymous contributor's name is withheld from everyone.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionView {
    pub id: String,
    pub contributor_name: Option<String>,
    pub amount: Option<i64>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ContributionView {
    /// Applies the funding's transparency settings to a contribution.
    ///
    /// The name is withheld when the contribution is anonymous, regardless
    /// of settings, and also when `show_names` is off for non-host viewers.
    pub fn redact(
        contribution: &Contribution,
        settings: &TransparencySettings,
        viewer_is_host: bool,
    ) -> Self {
        let show_name = !contribution.is_anonymous && (viewer_is_host || settings.show_names);
        let show_amount = viewer_is_host || settings.show_amounts;
        Self {
            id: contribution.id.clone(),
            contributor_name: show_name.then(|| contribution.contributor_name.clone()),
            amount: show_amount.then_some(contribution.amount),
            message: contribution.message.clone(),
            timestamp: contribution.timestamp,
        }
    }
}
