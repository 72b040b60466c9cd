use crate::error::{Result, StoreError};
use crate::query::{AppointmentQuery, APPOINTMENT_COLUMNS};
use carebook_core::booking::AppointmentStore;
use carebook_core::domain::{
    normalize_email, Appointment, AppointmentId, AppointmentStatus, NewAppointment,
    PatientIntake, Service,
};
use carebook_core::rules::ensure_status_transition;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct AppointmentsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AppointmentsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: NewAppointment) -> Result<Appointment> {
        input.service.validate()?;

        let appointment = Appointment {
            id: AppointmentId::new(),
            service: input.service,
            date: input.date,
            patient: input.patient,
            payment_reference: input.payment_reference,
            status: AppointmentStatus::Booked,
            created_at: now_utc,
            updated_at: now_utc,
        };
        let email_key = normalize_email(&appointment.patient.email).unwrap_or_default();

        self.conn.execute(
            "INSERT INTO appointments (
                id, service_id, service_name, service_description, service_price,
                service_duration_minutes, date, patient_full_name, patient_email,
                patient_email_key, patient_phone, patient_notes, payment_reference,
                status, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                appointment.id.to_string(),
                appointment.service.id,
                appointment.service.name,
                appointment.service.description,
                appointment.service.price.to_string(),
                appointment.service.duration_minutes,
                appointment.date.format(DATE_FORMAT).to_string(),
                appointment.patient.full_name,
                appointment.patient.email,
                email_key,
                appointment.patient.phone,
                appointment.patient.notes,
                appointment.payment_reference,
                appointment.status.as_str(),
                appointment.created_at,
                appointment.updated_at,
            ],
        )?;

        debug!(id = %appointment.id, date = %appointment.date, "appointment stored");
        Ok(appointment)
    }

    pub fn get(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        get_inner(self.conn, id)
    }

    pub fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>> {
        let sql = query.to_sql();
        let mut stmt = self.conn.prepare(&sql.sql)?;
        let mut rows = stmt.query(params_from_iter(sql.params.iter()))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(appointment_from_row(row)?);
        }
        Ok(items)
    }

    /// Appointments whose patient email matches `email` after trimming and
    /// lowercasing both sides.
    pub fn list_for_email(&self, email: &str) -> Result<Vec<Appointment>> {
        self.list(&AppointmentQuery::for_email(email))
    }

    pub fn update_status(
        &self,
        now_utc: i64,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let tx = self.conn.unchecked_transaction()?;

        let mut appointment =
            get_inner(&tx, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        ensure_status_transition(appointment.status, status)?;

        tx.execute(
            "UPDATE appointments SET status = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), status.as_str(), now_utc],
        )?;
        tx.commit()?;

        debug!(%id, from = %appointment.status, to = %status, "appointment status changed");
        appointment.status = status;
        appointment.updated_at = now_utc;
        Ok(appointment)
    }

    pub fn delete(&self, id: AppointmentId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM appointments;", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl AppointmentStore for AppointmentsRepo<'_> {
    type Error = StoreError;

    fn create_appointment(&self, input: NewAppointment) -> Result<Appointment> {
        self.create(Utc::now().timestamp(), input)
    }
}

fn get_inner(conn: &Connection, id: AppointmentId) -> Result<Option<Appointment>> {
    let sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1;");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(appointment_from_row(row)?)),
        None => Ok(None),
    }
}

fn appointment_from_row(row: &Row<'_>) -> Result<Appointment> {
    let id_raw: String = row.get(0)?;
    let corrupt = |reason: String| StoreError::CorruptRow {
        id: id_raw.clone(),
        reason,
    };

    let id = AppointmentId::from_str(&id_raw).map_err(|_| StoreError::InvalidId(id_raw.clone()))?;
    let price_raw: String = row.get(4)?;
    let price = Decimal::from_str(&price_raw)
        .map_err(|err| corrupt(format!("price {price_raw:?}: {err}")))?;
    let date_raw: String = row.get(6)?;
    let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT)
        .map_err(|err| corrupt(format!("date {date_raw:?}: {err}")))?;
    let status_raw: String = row.get(12)?;
    let status = AppointmentStatus::from_str(&status_raw)
        .map_err(|err| corrupt(err.to_string()))?;

    Ok(Appointment {
        id,
        service: Service {
            id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            price,
            duration_minutes: row.get(5)?,
        },
        date,
        patient: PatientIntake {
            full_name: row.get(7)?,
            email: row.get(8)?,
            phone: row.get(9)?,
            notes: row.get(10)?,
        },
        payment_reference: row.get(11)?,
        status,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}
