//! Funding domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{errors::ValidationError, Error, Result};

/// Occasion a funding is collecting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Birthday,
    Wedding,
    Graduation,
    Baby,
    Housewarming,
    Retirement,
    /// Free-form occasion; requires a custom label on the funding.
    Other,
}

impl Occasion {
    /// True iff this occasion needs the funding's `custom_occasion` text.
    pub fn requires_custom_label(&self) -> bool {
        matches!(self, Occasion::Other)
    }

    /// Fixed display label for the occasion.
    pub fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Wedding => "Wedding",
            Occasion::Graduation => "Graduation",
            Occasion::Baby => "New baby",
            Occasion::Housewarming => "Housewarming",
            Occasion::Retirement => "Retirement",
            Occasion::Other => "Gift",
        }
    }
}

impl FromStr for Occasion {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| ValidationError::InvalidInput(format!("Unknown occasion '{}'", s)))
    }
}

/// Returns true if `s` names one of the fixed occasions (including "other").
pub fn is_valid_occasion(s: &str) -> bool {
    Occasion::from_str(s).is_ok()
}

/// Lifecycle status of a funding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FundingStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

/// A suggested purchase target attached to a funding. Pure value data,
/// embedded in its funding with no independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GiftCandidate {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

/// Per-funding flags controlling what read paths may reveal to viewers who
/// are not the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransparencySettings {
    pub show_amounts: bool,
    pub show_names: bool,
    pub show_goal: bool,
}

impl Default for TransparencySettings {
    fn default() -> Self {
        Self {
            show_amounts: true,
            show_names: true,
            show_goal: true,
        }
    }
}

/// Domain model representing a funding campaign.
///
/// Amounts are whole currency units. `current_amount` is written only by the
/// contribution-recording operation and always equals the sum of the
/// contributions recorded against this funding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    pub id: String,
    /// Owner of the funding, immutable after creation.
    pub host_id: String,
    pub host_name: String,
    pub title: String,
    pub recipient_name: String,
    pub occasion: Occasion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_occasion: Option<String>,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub gift_candidates: Vec<GiftCandidate>,
    #[serde(default)]
    pub transparency_settings: TransparencySettings,
    pub created_at: DateTime<Utc>,
    pub status: FundingStatus,
}

impl Funding {
    /// Fraction of the target collected so far, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0 {
            return 0.0;
        }
        (self.current_amount as f64 / self.target_amount as f64).min(1.0)
    }

    /// True once the collected total meets or exceeds the target.
    pub fn is_goal_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Calendar days until the deadline. Negative when overdue.
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_from(Utc::now().date_naive())
    }

    /// Calendar days from `today` until the deadline.
    pub fn days_remaining_from(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    /// Display label for the occasion, preferring the custom text when the
    /// occasion is "other".
    pub fn occasion_label(&self) -> &str {
        match (&self.occasion, &self.custom_occasion) {
            (Occasion::Other, Some(custom)) if !custom.is_empty() => custom,
            (occasion, _) => occasion.label(),
        }
    }
}

/// Input model for creating a new funding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFunding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub host_id: String,
    pub host_name: String,
    pub title: String,
    pub recipient_name: String,
    pub occasion: Occasion,
    pub custom_occasion: Option<String>,
    pub target_amount: i64,
    pub deadline: NaiveDate,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub gift_candidates: Vec<GiftCandidate>,
    #[serde(default)]
    pub transparency_settings: TransparencySettings,
}

impl NewFunding {
    /// Validates the new funding data.
    pub fn validate(&self) -> Result<()> {
        if self.host_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "hostId".to_string(),
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Funding title cannot be empty".to_string(),
            )));
        }
        if self.recipient_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Recipient name cannot be empty".to_string(),
            )));
        }
        if self.target_amount <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Target amount must be positive".to_string(),
            )));
        }
        if self.occasion.requires_custom_label()
            && self
                .custom_occasion
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(Error::Validation(ValidationError::MissingField(
                "customOccasion".to_string(),
            )));
        }
        for candidate in &self.gift_candidates {
            if candidate.name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Gift candidate name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Builds the persisted funding, assigning identity and initial state.
    pub fn into_funding(self, id: String, created_at: DateTime<Utc>) -> Funding {
        Funding {
            id,
            host_id: self.host_id,
            host_name: self.host_name,
            title: self.title,
            recipient_name: self.recipient_name,
            occasion: self.occasion,
            custom_occasion: self.custom_occasion,
            target_amount: self.target_amount,
            current_amount: 0,
            deadline: self.deadline,
            cover_image: self.cover_image,
            gift_candidates: self.gift_candidates,
            transparency_settings: self.transparency_settings,
            created_at,
            status: FundingStatus::Active,
        }
    }
}
