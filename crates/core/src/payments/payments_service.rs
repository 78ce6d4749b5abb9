//! Mock payment gateway.
//!
//! Models a settlement provider as a black box: a short processing delay and
//! a small random failure rate, returning a transaction id on success. Real
//! settlement is out of scope.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::time::Duration;
use uuid::Uuid;

use super::payments_model::{PaymentRequest, PaymentResponse};

/// Default simulated processing latency.
const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Default simulated failure rate.
const DEFAULT_FAILURE_RATE: f64 = 0.05;

/// Trait for payment gateway operations.
#[async_trait]
pub trait PaymentGatewayTrait: Send + Sync {
    async fn process_payment(&self, request: PaymentRequest) -> PaymentResponse;
}

/// Simulated payment gateway with tunable latency and failure rate.
pub struct MockPaymentGateway {
    latency: Duration,
    failure_rate: f64,
}

impl MockPaymentGateway {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate,
        }
    }

    /// Gateway that settles instantly and never fails. For tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, DEFAULT_FAILURE_RATE)
    }
}

#[async_trait]
impl PaymentGatewayTrait for MockPaymentGateway {
    async fn process_payment(&self, request: PaymentRequest) -> PaymentResponse {
        debug!(
            "Processing payment of {} via {:?} for {}",
            request.amount, request.method, request.contributor_name
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if rand::random::<f64>() < self.failure_rate {
            return PaymentResponse {
                success: false,
                transaction_id: None,
                error: Some("Payment processing failed. Please try again.".to_string()),
            };
        }

        let suffix = Uuid::new_v4().simple().to_string();
        PaymentResponse {
            success: true,
            transaction_id: Some(format!(
                "TXN-{}-{}",
                Utc::now().timestamp_millis(),
                &suffix[..9]
            )),
            error: None,
        }
    }
}
