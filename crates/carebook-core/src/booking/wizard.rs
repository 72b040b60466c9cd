use crate::booking::error::BookingError;
use crate::booking::payment::{PaymentGateway, PaymentOutcome, PaymentRequest};
use crate::booking::store::AppointmentStore;
use crate::catalog::ServiceCatalog;
use crate::domain::{to_subunits, Appointment, NewAppointment, PatientIntake, Service};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingService,
    SelectingDate,
    EnteringDetails,
    AwaitingPayment,
}

impl WizardStep {
    /// One-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectingService => 1,
            WizardStep::SelectingDate => 2,
            WizardStep::EnteringDetails => 3,
            WizardStep::AwaitingPayment => 4,
        }
    }

    fn previous(self) -> Self {
        match self {
            WizardStep::SelectingService | WizardStep::SelectingDate => {
                WizardStep::SelectingService
            }
            WizardStep::EnteringDetails => WizardStep::SelectingDate,
            WizardStep::AwaitingPayment => WizardStep::EnteringDetails,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardStep::SelectingService => "selecting a service",
            WizardStep::SelectingDate => "selecting a date",
            WizardStep::EnteringDetails => "entering details",
            WizardStep::AwaitingPayment => "awaiting payment",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    service: Option<Service>,
    date: Option<NaiveDate>,
    intake: Option<PatientIntake>,
}

impl BookingDraft {
    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Last accepted intake, used to pre-fill the form when the user comes back to it.
    pub fn intake(&self) -> Option<&PatientIntake> {
        self.intake.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.date.is_none() && self.intake.is_none()
    }

    fn to_new_appointment(&self, payment_reference: String) -> Option<NewAppointment> {
        Some(NewAppointment {
            service: self.service.clone()?,
            date: self.date?,
            patient: self.intake.clone()?,
            payment_reference: Some(payment_reference),
        })
    }
}

/// Four-stage booking flow: service, date, patient details, payment.
///
/// Each method is one user event. An event the current stage does not accept
/// is rejected without touching the draft. `back` never discards what was
/// collected; only a successful commit or a defensive reset clears the draft.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectingService,
            draft: BookingDraft::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn select_service(&mut self, service: Option<Service>) -> Result<(), BookingError> {
        self.expect_step(WizardStep::SelectingService, "select a service")?;
        let service = service.ok_or(BookingError::MissingService)?;
        debug!(service = %service.id, "service selected");
        self.draft.service = Some(service);
        self.step = WizardStep::SelectingDate;
        Ok(())
    }

    pub fn choose_service<C: ServiceCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        id: &str,
    ) -> Result<(), BookingError> {
        self.expect_step(WizardStep::SelectingService, "select a service")?;
        let service = catalog
            .find(id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownService(id.to_string()))?;
        self.select_service(Some(service))
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) -> Result<(), BookingError> {
        self.expect_step(WizardStep::SelectingDate, "select a date")?;
        let date = date.ok_or(BookingError::MissingDate)?;
        debug!(%date, "date selected");
        self.draft.date = Some(date);
        self.step = WizardStep::EnteringDetails;
        Ok(())
    }

    pub fn submit_intake(&mut self, intake: PatientIntake) -> Result<(), BookingError> {
        self.expect_step(WizardStep::EnteringDetails, "submit details")?;
        intake.validate()?;

        if self.draft.service.is_none() || self.draft.date.is_none() {
            warn!("details submitted without service or date, restarting booking");
            self.reset();
            return Err(BookingError::IncompleteDraft);
        }

        debug!("patient details accepted");
        self.draft.intake = Some(intake);
        self.step = WizardStep::AwaitingPayment;
        Ok(())
    }

    pub fn back(&mut self) {
        let previous = self.step.previous();
        if previous != self.step {
            debug!(from = %self.step, to = %previous, "wizard stepped back");
        }
        self.step = previous;
    }

    pub fn reset(&mut self) {
        self.step = WizardStep::SelectingService;
        self.draft = BookingDraft::default();
    }

    /// What the payment stage charges, in subunits of `currency`.
    pub fn payment_request(&self, currency: &str) -> Result<PaymentRequest, BookingError> {
        self.expect_step(WizardStep::AwaitingPayment, "start payment")?;
        let (service, intake) = match (&self.draft.service, &self.draft.intake) {
            (Some(service), Some(intake)) => (service, intake),
            _ => return Err(BookingError::IncompleteDraft),
        };
        Ok(PaymentRequest {
            amount: to_subunits(service.price)?,
            currency: currency.to_string(),
            email: intake.email.clone(),
            full_name: intake.full_name.clone(),
        })
    }

    /// Runs one payment attempt through `gateway` and applies its outcome.
    pub fn pay<G, S>(
        &mut self,
        gateway: &mut G,
        currency: &str,
        store: &S,
    ) -> Result<Appointment, BookingError>
    where
        G: PaymentGateway + ?Sized,
        S: AppointmentStore + ?Sized,
    {
        let request = self.payment_request(currency)?;
        debug!(amount = request.amount, currency = %request.currency, "payment started");
        let outcome = gateway.collect(&request);
        self.complete_payment(outcome, store)
    }

    pub fn complete_payment<S: AppointmentStore + ?Sized>(
        &mut self,
        outcome: PaymentOutcome,
        store: &S,
    ) -> Result<Appointment, BookingError> {
        self.expect_step(WizardStep::AwaitingPayment, "complete payment")?;

        let reference = match outcome {
            PaymentOutcome::Closed => {
                debug!("payment closed before completion");
                return Err(BookingError::PaymentClosed);
            }
            PaymentOutcome::Success { reference } => reference,
        };

        let Some(input) = self.draft.to_new_appointment(reference) else {
            warn!("payment succeeded with an incomplete draft, restarting booking");
            self.reset();
            return Err(BookingError::IncompleteAfterPayment);
        };

        let appointment = store
            .create_appointment(input)
            .map_err(|err| BookingError::Store(Box::new(err)))?;
        debug!(id = %appointment.id, "appointment booked");
        self.reset();
        Ok(appointment)
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), BookingError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(BookingError::WrongStep {
                action,
                step: self.step,
            })
        }
    }

    #[cfg(test)]
    fn force_draft(&mut self, step: WizardStep, draft: BookingDraft) {
        self.step = step;
        self.draft = draft;
    }
}
