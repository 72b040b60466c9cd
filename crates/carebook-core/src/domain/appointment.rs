use crate::domain::ids::AppointmentId;
use crate::domain::intake::PatientIntake;
use crate::domain::service::Service;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Cancelled,
    /// Storable, but nothing in carebook sets it.
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "booked" => Ok(AppointmentStatus::Booked),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" => Ok(AppointmentStatus::NoShow),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub service: Service,
    pub date: NaiveDate,
    pub patient: PatientIntake,
    pub payment_reference: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// What the booking flow hands to an appointment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub service: Service,
    pub date: NaiveDate,
    pub patient: PatientIntake,
    pub payment_reference: Option<String>,
}
