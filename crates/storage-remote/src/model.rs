//! Wire models for the remote tables.
//!
//! Row types mirror the storage schema's snake_case columns; gift candidates
//! and transparency settings are embedded JSON documents and keep the domain
//! model's camelCase keys inside the column. The `From` pairs are the single
//! place the field-name mapping lives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use giftpool_core::contributions::{Contribution, PaymentMethod};
use giftpool_core::fundings::{
    Funding, FundingStatus, GiftCandidate, Occasion, TransparencySettings,
};

/// Row shape of the `fundings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingRow {
    pub id: String,
    pub host_id: String,
    pub host_name: String,
    pub title: String,
    pub recipient_name: String,
    pub occasion: Occasion,
    #[serde(default)]
    pub custom_occasion: Option<String>,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub gift_candidates: Vec<GiftCandidate>,
    #[serde(default)]
    pub transparency_settings: TransparencySettings,
    pub created_at: DateTime<Utc>,
    pub status: FundingStatus,
}

impl From<FundingRow> for Funding {
    fn from(row: FundingRow) -> Self {
        Funding {
            id: row.id,
            host_id: row.host_id,
            host_name: row.host_name,
            title: row.title,
            recipient_name: row.recipient_name,
            occasion: row.occasion,
            custom_occasion: row.custom_occasion,
            target_amount: row.target_amount,
            current_amount: row.current_amount,
            deadline: row.deadline,
            cover_image: row.cover_image,
            gift_candidates: row.gift_candidates,
            transparency_settings: row.transparency_settings,
            created_at: row.created_at,
            status: row.status,
        }
    }
}

impl From<Funding> for FundingRow {
    fn from(funding: Funding) -> Self {
        FundingRow {
            id: funding.id,
            host_id: funding.host_id,
            host_name: funding.host_name,
            title: funding.title,
            recipient_name: funding.recipient_name,
            occasion: funding.occasion,
            custom_occasion: funding.custom_occasion,
            target_amount: funding.target_amount,
            current_amount: funding.current_amount,
            deadline: funding.deadline,
            cover_image: funding.cover_image,
            gift_candidates: funding.gift_candidates,
            transparency_settings: funding.transparency_settings,
            created_at: funding.created_at,
            status: funding.status,
        }
    }
}

/// Row shape of the `contributions` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionRow {
    pub id: String,
    pub funding_id: String,
    pub contributor_name: String,
    pub amount: i64,
    #[serde(default)]
    pub message: String,
    pub is_anonymous: bool,
    pub timestamp: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

impl From<ContributionRow> for Contribution {
    fn from(row: ContributionRow) -> Self {
        Contribution {
            id: row.id,
            funding_id: row.funding_id,
            contributor_name: row.contributor_name,
            amount: row.amount,
            message: row.message,
            is_anonymous: row.is_anonymous,
            timestamp: row.timestamp,
            payment_method: row.payment_method,
        }
    }
}

impl From<Contribution> for ContributionRow {
    fn from(contribution: Contribution) -> Self {
        ContributionRow {
            id: contribution.id,
            funding_id: contribution.funding_id,
            contributor_name: contribution.contributor_name,
            amount: contribution.amount,
            message: contribution.message,
            is_anonymous: contribution.is_anonymous,
            timestamp: contribution.timestamp,
            payment_method: contribution.payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_funding() -> Funding {
        Funding {
            id: "f1".to_string(),
            host_id: "host-1".to_string(),
            host_name: "Jisoo".to_string(),
            title: "Gift for Dana".to_string(),
            recipient_name: "Dana".to_string(),
            occasion: Occasion::Other,
            custom_occasion: Some("Farewell".to_string()),
            target_amount: 100000,
            current_amount: 30000,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            cover_image: Some("https://example.com/cover.png".to_string()),
            gift_candidates: vec![GiftCandidate {
                id: "g1".to_string(),
                name: "Espresso machine".to_string(),
                description: None,
                image_url: Some("https://example.com/g1.png".to_string()),
                link: None,
                price: Some(80000),
            }],
            transparency_settings: TransparencySettings {
                show_amounts: false,
                show_names: true,
                show_goal: true,
            },
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            status: FundingStatus::Active,
        }
    }

    #[test]
    fn test_funding_row_round_trip() {
        let funding = test_funding();
        let row = FundingRow::from(funding.clone());
        assert_eq!(Funding::from(row), funding);
    }

    #[test]
    fn test_funding_row_uses_snake_case_columns() {
        let row = FundingRow::from(test_funding());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["host_id"], "host-1");
        assert_eq!(json["recipient_name"], "Dana");
        assert_eq!(json["target_amount"], 100000);
        assert_eq!(json["current_amount"], 30000);
        assert_eq!(json["custom_occasion"], "Farewell");
        // Embedded documents keep the domain model's camelCase keys.
        assert_eq!(json["gift_candidates"][0]["imageUrl"], "https://example.com/g1.png");
        assert_eq!(json["transparency_settings"]["showAmounts"], false);
    }

    #[test]
    fn test_funding_row_tolerates_missing_embedded_columns() {
        let json = r#"{
            "id": "f1",
            "host_id": "host-1",
            "host_name": "Jisoo",
            "title": "Gift for Dana",
            "recipient_name": "Dana",
            "occasion": "wedding",
            "target_amount": 50000,
            "current_amount": 0,
            "deadline": "2025-06-30",
            "created_at": "2025-06-01T09:00:00Z",
            "status": "active"
        }"#;
        let row: FundingRow = serde_json::from_str(json).unwrap();
        assert!(row.gift_candidates.is_empty());
        assert!(row.transparency_settings.show_names);
        assert!(row.custom_occasion.is_none());
    }

    #[test]
    fn test_contribution_row_round_trip() {
        let contribution = Contribution {
            id: "c1".to_string(),
            funding_id: "f1".to_string(),
            contributor_name: "Mina".to_string(),
            amount: 30000,
            message: "Congrats!".to_string(),
            is_anonymous: true,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap(),
            payment_method: PaymentMethod::Pay,
        };
        let row = ContributionRow::from(contribution.clone());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["funding_id"], "f1");
        assert_eq!(json["contributor_name"], "Mina");
        assert_eq!(json["is_anonymous"], true);
        assert_eq!(json["payment_method"], "pay");
        assert_eq!(Contribution::from(row), contribution);
    }
}
