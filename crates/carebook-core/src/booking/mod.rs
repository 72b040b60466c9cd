pub mod error;
pub mod payment;
pub mod store;
pub mod wizard;

pub use error::BookingError;
pub use payment::{PaymentGateway, PaymentOutcome, PaymentRequest};
pub use store::AppointmentStore;
pub use wizard::{BookingDraft, BookingWizard, WizardStep};
