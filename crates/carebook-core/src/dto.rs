use crate::domain::{Appointment, AppointmentId, AppointmentStatus, PatientIntake, Service};
use crate::rules::staff_actions;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentListItemDto {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub service_name: String,
    pub patient_name: String,
    pub patient_email: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetailDto {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub service: Service,
    pub patient: PatientIntake,
    pub payment_reference: Option<String>,
    pub status: AppointmentStatus,
    pub available_actions: Vec<AppointmentStatus>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Appointment> for AppointmentListItemDto {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date,
            service_name: appointment.service.name.clone(),
            patient_name: appointment.patient.full_name.clone(),
            patient_email: appointment.patient.email.clone(),
            status: appointment.status,
        }
    }
}

impl From<Appointment> for AppointmentDetailDto {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date,
            available_actions: staff_actions(appointment.status).to_vec(),
            service: appointment.service,
            patient: appointment.patient,
            payment_reference: appointment.payment_reference,
            status: appointment.status,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}
