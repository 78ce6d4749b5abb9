//! Tests for funding domain models and predicates.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::fundings::{
        is_valid_occasion, Funding, FundingStatus, GiftCandidate, NewFunding, Occasion,
        TransparencySettings,
    };

    fn test_funding(target_amount: i64, current_amount: i64) -> Funding {
        Funding {
            id: "f1".to_string(),
            host_id: "host-1".to_string(),
            host_name: "Jisoo".to_string(),
            title: "Gift for Dana".to_string(),
            recipient_name: "Dana".to_string(),
            occasion: Occasion::Birthday,
            custom_occasion: None,
            target_amount,
            current_amount,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            cover_image: None,
            gift_candidates: Vec::new(),
            transparency_settings: TransparencySettings::default(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            status: FundingStatus::Active,
        }
    }

    fn test_new_funding() -> NewFunding {
        NewFunding {
            id: None,
            host_id: "host-1".to_string(),
            host_name: "Jisoo".to_string(),
            title: "Gift for Dana".to_string(),
            recipient_name: "Dana".to_string(),
            occasion: Occasion::Birthday,
            custom_occasion: None,
            target_amount: 100000,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            cover_image: None,
            gift_candidates: Vec::new(),
            transparency_settings: TransparencySettings::default(),
        }
    }

    // ==================== Progress / Goal Tests ====================

    #[test]
    fn test_progress_partial() {
        let funding = test_funding(100000, 30000);
        assert!((funding.progress() - 0.3).abs() < 1e-9);
        assert!(!funding.is_goal_reached());
    }

    #[test]
    fn test_progress_clamped_at_one() {
        let funding = test_funding(100000, 150000);
        assert_eq!(funding.progress(), 1.0);
        assert!(funding.is_goal_reached());
    }

    #[test]
    fn test_goal_reached_at_exact_target() {
        let funding = test_funding(100000, 100000);
        assert_eq!(funding.progress(), 1.0);
        assert!(funding.is_goal_reached());
    }

    #[test]
    fn test_progress_zero() {
        let funding = test_funding(100000, 0);
        assert_eq!(funding.progress(), 0.0);
    }

    // ==================== Deadline Tests ====================

    #[test]
    fn test_days_remaining_future() {
        let funding = test_funding(100000, 0);
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert_eq!(funding.days_remaining_from(today), 10);
    }

    #[test]
    fn test_days_remaining_on_deadline() {
        let funding = test_funding(100000, 0);
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(funding.days_remaining_from(today), 0);
    }

    #[test]
    fn test_days_remaining_overdue_is_negative() {
        let funding = test_funding(100000, 0);
        let today = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();
        assert_eq!(funding.days_remaining_from(today), -5);
    }

    // ==================== Occasion Tests ====================

    #[test]
    fn test_occasion_from_str() {
        assert_eq!(Occasion::from_str("birthday").unwrap(), Occasion::Birthday);
        assert_eq!(Occasion::from_str("other").unwrap(), Occasion::Other);
        assert!(Occasion::from_str("anniversary").is_err());
    }

    #[test]
    fn test_is_valid_occasion() {
        for name in [
            "birthday",
            "wedding",
            "graduation",
            "baby",
            "housewarming",
            "retirement",
            "other",
        ] {
            assert!(is_valid_occasion(name), "expected '{}' to be valid", name);
        }
        assert!(!is_valid_occasion("Birthday"));
        assert!(!is_valid_occasion(""));
    }

    #[test]
    fn test_requires_custom_label() {
        assert!(Occasion::Other.requires_custom_label());
        assert!(!Occasion::Wedding.requires_custom_label());
    }

    #[test]
    fn test_occasion_label_prefers_custom_text() {
        let mut funding = test_funding(100000, 0);
        funding.occasion = Occasion::Other;
        funding.custom_occasion = Some("First marathon".to_string());
        assert_eq!(funding.occasion_label(), "First marathon");

        funding.custom_occasion = None;
        assert_eq!(funding.occasion_label(), "Gift");

        funding.occasion = Occasion::Birthday;
        assert_eq!(funding.occasion_label(), "Birthday");
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_accepts_complete_funding() {
        assert!(test_new_funding().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut new_funding = test_new_funding();
        new_funding.title = "   ".to_string();
        assert!(new_funding.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_target() {
        let mut new_funding = test_new_funding();
        new_funding.target_amount = 0;
        assert!(new_funding.validate().is_err());
        new_funding.target_amount = -500;
        assert!(new_funding.validate().is_err());
    }

    #[test]
    fn test_validate_requires_custom_occasion_for_other() {
        let mut new_funding = test_new_funding();
        new_funding.occasion = Occasion::Other;
        new_funding.custom_occasion = None;
        assert!(new_funding.validate().is_err());

        new_funding.custom_occasion = Some("".to_string());
        assert!(new_funding.validate().is_err());

        new_funding.custom_occasion = Some("Farewell".to_string());
        assert!(new_funding.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unnamed_gift_candidate() {
        let mut new_funding = test_new_funding();
        new_funding.gift_candidates.push(GiftCandidate {
            id: "g1".to_string(),
            name: "".to_string(),
            description: None,
            image_url: None,
            link: None,
            price: None,
        });
        assert!(new_funding.validate().is_err());
    }

    #[test]
    fn test_into_funding_initial_state() {
        let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let funding = test_new_funding().into_funding("f9".to_string(), created_at);
        assert_eq!(funding.id, "f9");
        assert_eq!(funding.current_amount, 0);
        assert_eq!(funding.status, FundingStatus::Active);
        assert_eq!(funding.created_at, created_at);
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_funding_serializes_camel_case() {
        let funding = test_funding(100000, 30000);
        let json = serde_json::to_value(&funding).unwrap();
        assert_eq!(json["hostId"], "host-1");
        assert_eq!(json["targetAmount"], 100000);
        assert_eq!(json["currentAmount"], 30000);
        assert_eq!(json["occasion"], "birthday");
        assert_eq!(json["status"], "active");
        assert_eq!(json["transparencySettings"]["showAmounts"], true);
    }

    #[test]
    fn test_funding_round_trips_through_json() {
        let funding = test_funding(100000, 30000);
        let json = serde_json::to_string(&funding).unwrap();
        let back: Funding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, funding);
    }

    #[test]
    fn test_funding_deserializes_with_missing_embedded_fields() {
        // Older records may lack candidates and transparency settings.
        let json = r#"{
            "id": "f1",
            "hostId": "host-1",
            "hostName": "Jisoo",
            "title": "Gift for Dana",
            "recipientName": "Dana",
            "occasion": "wedding",
            "targetAmount": 50000,
            "currentAmount": 0,
            "deadline": "2025-06-30",
            "createdAt": "2025-06-01T09:00:00Z",
            "status": "active"
        }"#;
        let funding: Funding = serde_json::from_str(json).unwrap();
        assert!(funding.gift_candidates.is_empty());
        assert!(funding.transparency_settings.show_names);
    }
}
