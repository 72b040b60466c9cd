pub mod status;

pub use status::{ensure_status_transition, staff_actions};
