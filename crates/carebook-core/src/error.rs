use crate::domain::AppointmentStatus;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("service id is required")]
    EmptyServiceId,
    #[error("service name is required")]
    EmptyServiceName,
    #[error("invalid service price: {0}")]
    InvalidPrice(String),
    #[error("invalid service duration: {0} minutes")]
    InvalidDuration(u32),
    #[error("duplicate service id: {0}")]
    DuplicateServiceId(String),
    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),
    #[error("invalid appointment status: {0}")]
    InvalidStatus(String),
    #[error("cannot change appointment status from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}
