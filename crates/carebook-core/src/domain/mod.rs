pub mod appointment;
pub mod email;
pub mod ids;
pub mod intake;
pub mod money;
pub mod phone;
pub mod service;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use email::{is_valid_email, normalize_email};
pub use ids::AppointmentId;
pub use intake::{IntakeField, IntakeFieldError, IntakeErrors, PatientIntake};
pub use money::{format_price, to_subunits};
pub use phone::{is_valid_phone_format, MIN_PHONE_LEN};
pub use service::Service;
