//! Handoff of a confirmed booking to the persistence collaborator.
//!
//! The sink owns storage and the confirmation email. It is called exactly
//! once per completed wizard run and never retried from here.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, SlotLabel};
use crate::wizard::{BookingDraft, BookingWizard, StepOutcome};

/// A finalized booking as sent to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub service_id: DbId,
    /// Barber id, or `"none"` for no preference.
    pub barber_id: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub time: SlotLabel,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl BookingSubmission {
    /// Build a submission from a draft with every selection made.
    ///
    /// Contact fields are trimmed; their format is the validator's concern.
    pub fn from_draft(draft: &BookingDraft) -> Result<Self, CoreError> {
        let mut missing = Vec::new();
        if draft.service.is_none() {
            missing.push("service");
        }
        if draft.barber.is_none() {
            missing.push("barber");
        }
        if draft.date.is_none() {
            missing.push("date");
        }
        if draft.time.is_none() {
            missing.push("time");
        }

        match (&draft.service, &draft.barber, draft.date, &draft.time) {
            (Some(service), Some(barber), Some(date), Some(time)) => Ok(Self {
                service_id: service.id,
                barber_id: barber.key(),
                date,
                time: time.clone(),
                name: draft.name.trim().to_string(),
                email: draft.email.trim().to_string(),
                phone: draft.phone.clone(),
                notes: draft.notes.trim().to_string(),
            }),
            _ => Err(CoreError::Validation(format!(
                "Booking is incomplete, missing: {}",
                missing.join(", ")
            ))),
        }
    }

    /// ISO 8601 calendar date.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Persistence collaborator for confirmed bookings.
#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn submit(&self, booking: &BookingSubmission) -> Result<(), CoreError>;
}

/// Confirm the wizard and submit the booking.
///
/// The wizard moves to the terminal step before the sink is called and
/// stays there if the sink fails; surfacing that failure is the caller's
/// job. If the wizard is not on the review step nothing is submitted.
pub async fn confirm_and_submit<S>(
    wizard: &mut BookingWizard,
    sink: &S,
) -> Result<BookingSubmission, CoreError>
where
    S: BookingSink + ?Sized,
{
    let booking = wizard.finalize()?;
    match wizard.confirm() {
        StepOutcome::Advanced(_) => {}
        StepOutcome::Blocked | StepOutcome::Ignored => {
            return Err(CoreError::Validation(format!(
                "Booking can only be confirmed from the review step, currently on step {}",
                wizard.step()
            )));
        }
    }

    tracing::info!(
        service_id = booking.service_id,
        barber_id = %booking.barber_id,
        date = %booking.iso_date(),
        time = %booking.time,
        "Submitting booking",
    );
    if let Err(e) = sink.submit(&booking).await {
        tracing::warn!(error = %e, "Booking submission failed");
        return Err(e);
    }
    Ok(booking)
}
