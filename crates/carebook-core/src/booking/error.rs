use crate::booking::wizard::WizardStep;
use crate::domain::IntakeErrors;
use crate::error::CoreError;
use thiserror::Error;

/// Everything the booking flow can refuse. None of these end the session:
/// the wizard is always left in a state the user can continue from.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(IntakeErrors),
    #[error("please select a service to proceed")]
    MissingService,
    #[error("please select a date to proceed")]
    MissingDate,
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("cannot {action} while {step}")]
    WrongStep {
        action: &'static str,
        step: WizardStep,
    },
    #[error("an unexpected error occurred, please restart the booking process")]
    IncompleteDraft,
    #[error("an unexpected error occurred after payment, please check your booking history")]
    IncompleteAfterPayment,
    #[error("payment was not completed, you can try again or go back")]
    PaymentClosed,
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("failed to save appointment: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<IntakeErrors> for BookingError {
    fn from(errors: IntakeErrors) -> Self {
        BookingError::Validation(errors)
    }
}
