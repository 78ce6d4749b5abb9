//! Payment gateway models.

use serde::{Deserialize, Serialize};

use crate::contributions::PaymentMethod;

/// Request handed to the payment gateway before a contribution is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: i64,
    pub method: PaymentMethod,
    pub contributor_name: String,
}

/// Outcome of a payment attempt. A contribution may only be recorded after
/// `success` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
