use crate::commands::{print_json, Context};
use crate::payment::OfflineGateway;
use crate::util::{optional_text, parse_date};
use anyhow::Result;
use carebook_core::booking::BookingWizard;
use carebook_core::domain::{format_price, PatientIntake};
use carebook_core::dto::AppointmentDetailDto;
use clap::{ArgAction, Args};
use tracing::debug;

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Catalog id of the service to book
    #[arg(long)]
    pub service: String,
    /// Appointment date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub notes: Option<String>,
    /// Reference to record for the payment; generated when omitted
    #[arg(long)]
    pub reference: Option<String>,
    /// Close the checkout without paying
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "reference")]
    pub abandon: bool,
}

pub fn book(ctx: &Context<'_>, args: BookArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let mut wizard = BookingWizard::new();

    wizard.choose_service(&ctx.config.catalog, args.service.trim())?;
    wizard.select_date(Some(date))?;
    wizard.submit_intake(PatientIntake {
        full_name: args.name,
        email: args.email,
        phone: args.phone,
        notes: optional_text(args.notes),
    })?;
    debug!(step = %wizard.step(), "ready for payment");

    let mut gateway = OfflineGateway::new(&ctx.config.payment, args.reference, args.abandon)?;
    let repo = ctx.store.appointments();
    let appointment = wizard.pay(&mut gateway, &ctx.config.payment.currency, &repo)?;

    ctx.notifier.success(&format!(
        "Appointment for {} booked successfully at {}!",
        appointment.patient.full_name, ctx.config.practice_name
    ));

    if ctx.json {
        return print_json(&AppointmentDetailDto::from(appointment));
    }

    println!(
        "booked {} on {}: {} ({} {})",
        appointment.id,
        appointment.date,
        appointment.service.name,
        format_price(appointment.service.price),
        ctx.config.payment.currency
    );
    if let Some(reference) = &appointment.payment_reference {
        println!("payment reference: {}", reference);
    }
    Ok(())
}
