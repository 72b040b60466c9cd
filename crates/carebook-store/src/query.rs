use carebook_core::domain::{normalize_email, AppointmentStatus};
use chrono::NaiveDate;
use rusqlite::types::Value;

pub(crate) const APPOINTMENT_COLUMNS: &str = "id, service_id, service_name, service_description, \
     service_price, service_duration_minutes, date, patient_full_name, patient_email, \
     patient_phone, patient_notes, payment_reference, status, created_at, updated_at";

/// Filters for the calendar and patient views. Empty means every appointment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub patient_email: Option<String>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl AppointmentQuery {
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn for_email(email: &str) -> Self {
        Self {
            patient_email: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(date) = self.date {
            clauses.push("date = ?");
            params.push(Value::from(date.format("%Y-%m-%d").to_string()));
        }

        if let Some(status) = self.status {
            clauses.push("status = ?");
            params.push(Value::from(status.as_str().to_string()));
        }

        if let Some(email) = &self.patient_email {
            clauses.push("patient_email_key = ?");
            // A blank filter matches nothing rather than everything.
            params.push(Value::from(normalize_email(email).unwrap_or_default()));
        }

        let mut sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date ASC, created_at ASC, id ASC;");

        SqlQuery { sql, params }
    }
}
