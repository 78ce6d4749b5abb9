//! Payments module - mock gateway and its contract.

mod payments_model;
mod payments_service;

pub use payments_model::{PaymentRequest, PaymentResponse};
pub use payments_service::{MockPaymentGateway, PaymentGatewayTrait};
