pub mod booking;
pub mod catalog;
pub mod domain;
pub mod dto;
pub mod error;
pub mod rules;

pub use booking::{
    AppointmentStore, BookingDraft, BookingError, BookingWizard, PaymentGateway, PaymentOutcome,
    PaymentRequest, WizardStep,
};
pub use catalog::{Catalog, ServiceCatalog};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use rules::*;
