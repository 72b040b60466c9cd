use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, parse_appointment_id, parse_date, parse_status};
use anyhow::Result;
use carebook_core::domain::{format_price, Appointment, AppointmentStatus};
use carebook_core::dto::{AppointmentDetailDto, AppointmentListItemDto};
use carebook_store::query::AppointmentQuery;
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    List(ListArgs),
    Show(IdArgs),
    /// Mark a booked appointment as completed
    Complete(IdArgs),
    /// Mark a booked appointment as cancelled
    Cancel(IdArgs),
    Delete(IdArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only appointments on this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Only appointments booked under this patient email
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: String,
}

pub fn list(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let query = AppointmentQuery {
        date: args.date.as_deref().map(parse_date).transpose()?,
        status: args.status.as_deref().map(parse_status).transpose()?,
        patient_email: args.email,
    };
    let appointments = ctx.store.appointments().list(&query)?;
    let items: Vec<AppointmentListItemDto> =
        appointments.iter().map(AppointmentListItemDto::from).collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no appointments");
        return Ok(());
    }

    for item in items {
        println!(
            "{}  {}  {:<9}  {}  {} <{}>",
            item.id, item.date, item.status, item.service_name, item.patient_name, item.patient_email
        );
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    let id = parse_appointment_id(&args.id)?;
    let appointment = ctx
        .store
        .appointments()
        .get(id)?
        .ok_or_else(|| not_found(format!("appointment {}", id)))?;

    if ctx.json {
        return print_json(&AppointmentDetailDto::from(appointment));
    }

    print_detail(ctx, &appointment);
    Ok(())
}

pub fn complete(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    set_status(ctx, &args.id, AppointmentStatus::Completed)
}

pub fn cancel(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    set_status(ctx, &args.id, AppointmentStatus::Cancelled)
}

pub fn delete(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    let id = parse_appointment_id(&args.id)?;
    ctx.store.appointments().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn set_status(ctx: &Context<'_>, raw_id: &str, status: AppointmentStatus) -> Result<()> {
    let id = parse_appointment_id(raw_id)?;
    let appointment = ctx
        .store
        .appointments()
        .update_status(now_utc(), id, status)?;
    ctx.notifier
        .success(&format!("Appointment status updated to {}!", appointment.status));

    if ctx.json {
        print_json(&serde_json::json!({ "id": appointment.id, "status": appointment.status }))?;
    } else {
        println!("{} {}", appointment.id, appointment.status);
    }
    Ok(())
}

fn print_detail(ctx: &Context<'_>, appointment: &Appointment) {
    println!("id: {}", appointment.id);
    println!("date: {}", appointment.date);
    println!("status: {}", appointment.status);
    println!(
        "service: {} ({} {}, {} min)",
        appointment.service.name,
        format_price(appointment.service.price),
        ctx.config.payment.currency,
        appointment.service.duration_minutes
    );
    println!("patient: {}", appointment.patient.full_name);
    println!("email: {}", appointment.patient.email);
    println!("phone: {}", appointment.patient.phone);
    if let Some(notes) = &appointment.patient.notes {
        println!("notes: {}", notes);
    }
    if let Some(reference) = &appointment.payment_reference {
        println!("payment reference: {}", reference);
    }
}
