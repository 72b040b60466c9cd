use crate::domain::{Appointment, NewAppointment};

/// Where the booking flow commits finished bookings.
pub trait AppointmentStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists a new appointment with a fresh id and status `booked`.
    fn create_appointment(&self, input: NewAppointment) -> Result<Appointment, Self::Error>;
}
