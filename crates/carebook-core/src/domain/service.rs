use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration_minutes: u32,
}

impl Service {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::EmptyServiceId);
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyServiceName);
        }
        if self.price.is_sign_negative() {
            return Err(CoreError::InvalidPrice(self.price.to_string()));
        }
        if self.duration_minutes == 0 {
            return Err(CoreError::InvalidDuration(self.duration_minutes));
        }
        Ok(())
    }
}
