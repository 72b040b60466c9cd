pub mod appointments;

pub use appointments::AppointmentsRepo;
