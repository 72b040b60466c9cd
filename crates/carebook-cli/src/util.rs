use anyhow::Result;
use carebook_core::domain::{AppointmentId, AppointmentStatus};
use chrono::{NaiveDate, Utc};
use std::str::FromStr;

use crate::error::invalid_input;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_input("invalid date format: expected YYYY-MM-DD"))
}

pub fn parse_appointment_id(raw: &str) -> Result<AppointmentId> {
    if raw.trim().is_empty() {
        return Err(invalid_input("appointment id cannot be empty"));
    }
    AppointmentId::from_str(raw).map_err(|_| invalid_input("invalid appointment id"))
}

pub fn parse_status(raw: &str) -> Result<AppointmentStatus> {
    AppointmentStatus::from_str(raw).map_err(|_| {
        invalid_input("invalid status: expected booked|completed|cancelled|no-show")
    })
}

/// Blank notes are the same as none.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
