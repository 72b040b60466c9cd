use crate::domain::AppointmentStatus;
use crate::error::CoreError;

/// Statuses staff may move an appointment to from `current`.
pub fn staff_actions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
    match current {
        AppointmentStatus::Booked => &[AppointmentStatus::Completed, AppointmentStatus::Cancelled],
        AppointmentStatus::Completed
        | AppointmentStatus::Cancelled
        | AppointmentStatus::NoShow => &[],
    }
}

pub fn ensure_status_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), CoreError> {
    if staff_actions(from).contains(&to) {
        Ok(())
    } else {
        Err(CoreError::InvalidStatusTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_status_transition, staff_actions};
    use crate::domain::AppointmentStatus::{Booked, Cancelled, Completed, NoShow};

    #[test]
    fn booked_can_complete_or_cancel() {
        assert!(ensure_status_transition(Booked, Completed).is_ok());
        assert!(ensure_status_transition(Booked, Cancelled).is_ok());
    }

    #[test]
    fn terminal_statuses_are_frozen() {
        for from in [Completed, Cancelled, NoShow] {
            assert!(staff_actions(from).is_empty());
            for to in [Booked, Completed, Cancelled, NoShow] {
                assert!(ensure_status_transition(from, to).is_err());
            }
        }
    }

    #[test]
    fn no_show_is_never_a_staff_action() {
        assert!(ensure_status_transition(Booked, NoShow).is_err());
        assert!(ensure_status_transition(Booked, Booked).is_err());
    }
}
