use anyhow::Result;
use carebook_config::PaymentConfig;
use carebook_core::booking::{PaymentGateway, PaymentOutcome, PaymentRequest};
use chrono::Utc;
use tracing::debug;

use crate::error::CliError;

/// Settles payments locally: no money moves. A run either reports the
/// reference it was given (or a timestamp reference) or behaves as if the
/// payer closed the checkout.
pub struct OfflineGateway {
    reference: Option<String>,
    abandon: bool,
}

impl OfflineGateway {
    pub fn new(config: &PaymentConfig, reference: Option<String>, abandon: bool) -> Result<Self> {
        if config.public_key.is_none() {
            return Err(CliError::PaymentUnavailable(format!(
                "payment public key is not configured (set [payment].public_key or {})",
                carebook_config::PUBLIC_KEY_ENV
            ))
            .into());
        }
        Ok(Self { reference, abandon })
    }
}

impl PaymentGateway for OfflineGateway {
    fn collect(&mut self, request: &PaymentRequest) -> PaymentOutcome {
        debug!(
            amount = request.amount,
            currency = %request.currency,
            email = %request.email,
            "offline checkout"
        );
        if self.abandon {
            return PaymentOutcome::Closed;
        }
        let reference = self
            .reference
            .take()
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());
        PaymentOutcome::Success { reference }
    }
}
