use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Amount in the currency's smallest unit.
    pub amount: i64,
    pub currency: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success { reference: String },
    Closed,
}

/// A checkout that settles each request with exactly one outcome.
pub trait PaymentGateway {
    fn collect(&mut self, request: &PaymentRequest) -> PaymentOutcome;
}
