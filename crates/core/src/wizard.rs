//! Booking wizard state machine.
//!
//! Five interactive steps (service, barber, date and time, contact details,
//! review) followed by a terminal confirmation step. Forward moves are gated
//! by [`crate::validation::validate`]; backward moves never are. The wizard
//! performs no I/O: [`BookingWizard::finalize`] hands the completed draft to
//! whoever submits it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::catalog::{BarberChoice, Catalog, Service};
use crate::config::BookingConfig;
use crate::error::CoreError;
use crate::phone::{self, PhoneEdit};
use crate::slots::{self, SlotOption};
use crate::submission::BookingSubmission;
use crate::types::{DbId, SlotLabel};
use crate::validation::{self, Field, FieldErrors};
use crate::viewport::{self, StepIndicator, Viewport};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The six wizard states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Service,
    Barber,
    DateTime,
    Details,
    Review,
    /// Terminal. Only [`BookingWizard::reset`] leaves it.
    Confirmed,
}

/// Total number of wizard states.
pub const TOTAL_STEPS: u8 = 6;

/// Number of steps drawn in the stepper (the terminal step has no circle).
pub const VISIBLE_STEPS: u8 = 5;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 6;

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        Self::Service,
        Self::Barber,
        Self::DateTime,
        Self::Details,
        Self::Review,
        Self::Confirmed,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Service),
            2 => Ok(Self::Barber),
            3 => Ok(Self::DateTime),
            4 => Ok(Self::Details),
            5 => Ok(Self::Review),
            6 => Ok(Self::Confirmed),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Service => 1,
            Self::Barber => 2,
            Self::DateTime => 3,
            Self::Details => 4,
            Self::Review => 5,
            Self::Confirmed => 6,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Barber => "Barber",
            Self::DateTime => "Date & Time",
            Self::Details => "Your Details",
            Self::Review => "Review",
            Self::Confirmed => "Confirmed",
        }
    }

    /// Fields whose errors this step owns.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Service => &[Field::Service],
            Self::Barber => &[Field::Barber],
            Self::DateTime => &[Field::Date, Field::Time],
            Self::Details => &[Field::Name, Field::Email, Field::Phone, Field::Notes],
            Self::Review | Self::Confirmed => &[],
        }
    }

    /// The following step, saturating at [`WizardStep::Confirmed`].
    pub fn following(self) -> Self {
        Self::from_number((self.to_number() + 1).min(MAX_STEP)).unwrap_or(self)
    }

    /// The preceding step, saturating at [`WizardStep::Service`].
    pub fn preceding(self) -> Self {
        Self::from_number(self.to_number().saturating_sub(1).max(MIN_STEP)).unwrap_or(self)
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Confirmed
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.to_number(), self.label())
    }
}

// ---------------------------------------------------------------------------
// Draft and state
// ---------------------------------------------------------------------------

/// The booking being assembled. Never persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service: Option<Service>,
    pub barber: Option<BarberChoice>,
    pub date: Option<NaiveDate>,
    /// `HH:MM`, one of the slots offered for `date`.
    pub time: Option<SlotLabel>,
    pub name: String,
    pub email: String,
    /// Canonical digits, no separators.
    pub phone: String,
    pub notes: String,
}

/// A single-field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Service(Service),
    Barber(BarberChoice),
    Date(NaiveDate),
    Time(SlotLabel),
    Name(String),
    Email(String),
    /// Raw input; stored as canonical digits.
    Phone(String),
    Notes(String),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            Self::Service(_) => Field::Service,
            Self::Barber(_) => Field::Barber,
            Self::Date(_) => Field::Date,
            Self::Time(_) => Field::Time,
            Self::Name(_) => Field::Name,
            Self::Email(_) => Field::Email,
            Self::Phone(_) => Field::Phone,
            Self::Notes(_) => Field::Notes,
        }
    }

    /// Build a text update from a field key and raw value.
    ///
    /// Only the free-text fields (`name`, `email`, `phone`, `notes`) can be
    /// set this way; selections go through the typed variants.
    pub fn text(key: &str, value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        match Field::from_key(key)? {
            Field::Name => Ok(Self::Name(value)),
            Field::Email => Ok(Self::Email(value)),
            Field::Phone => Ok(Self::Phone(value)),
            Field::Notes => Ok(Self::Notes(value)),
            other => Err(CoreError::Validation(format!(
                "Field '{other}' is a selection and cannot be set from text"
            ))),
        }
    }
}

/// Current step, draft and displayed field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: BookingDraft,
    pub errors: FieldErrors,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Service,
            draft: BookingDraft::default(),
            errors: FieldErrors::new(),
        }
    }
}

/// Result of a forward navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum StepOutcome {
    /// Moved to the contained step.
    Advanced(WizardStep),
    /// Validation failed; errors are now on the state.
    Blocked,
    /// Nothing to do from the current step.
    Ignored,
}

impl StepOutcome {
    pub fn is_advanced(self) -> bool {
        matches!(self, Self::Advanced(_))
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// One booking session. Owns its draft exclusively.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    config: BookingConfig,
    catalog: Catalog,
    state: WizardState,
}

impl BookingWizard {
    /// Start a session with the shop's default schedule.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(BookingConfig::default(), catalog)
    }

    pub fn with_config(config: BookingConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            state: WizardState::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.state.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.state.errors.get(&field).map(String::as_str)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    // -- navigation --

    /// Validate the current step and move forward if it passes.
    ///
    /// On failure the step's errors replace whatever was displayed for its
    /// fields and the step is unchanged.
    pub fn next(&mut self) -> StepOutcome {
        let from = self.state.step;
        if from.is_terminal() {
            return StepOutcome::Ignored;
        }

        let errors = validation::validate(from, &self.state.draft);
        for field in from.fields() {
            self.state.errors.remove(field);
        }
        if !errors.is_empty() {
            tracing::debug!(
                step = %from,
                error_count = errors.len(),
                "Booking wizard blocked by validation",
            );
            self.state.errors.extend(errors);
            return StepOutcome::Blocked;
        }

        let to = from.following();
        self.state.step = to;
        tracing::debug!(from = %from, to = %to, "Booking wizard advanced");
        StepOutcome::Advanced(to)
    }

    /// Move one step back. Never validates and never clears the draft.
    ///
    /// The terminal step is left only through [`BookingWizard::reset`].
    pub fn back(&mut self) -> WizardStep {
        let from = self.state.step;
        if !from.is_terminal() {
            self.state.step = from.preceding();
            if self.state.step != from {
                tracing::debug!(from = %from, to = %self.state.step, "Booking wizard went back");
            }
        }
        self.state.step
    }

    /// Confirm the reviewed booking, moving to the terminal step.
    ///
    /// Only acts on the review step. The caller submits
    /// [`BookingWizard::finalize`] afterwards; the transition does not wait
    /// for persistence.
    pub fn confirm(&mut self) -> StepOutcome {
        if self.state.step != WizardStep::Review {
            return StepOutcome::Ignored;
        }
        let outcome = self.next();
        if outcome.is_advanced() {
            tracing::info!(
                service = ?self.state.draft.service.as_ref().map(|s| s.id),
                barber = ?self.state.draft.barber.as_ref().map(BarberChoice::key),
                date = ?self.state.draft.date,
                time = ?self.state.draft.time,
                "Booking confirmed",
            );
        }
        outcome
    }

    /// Discard the draft and start over at step 1.
    pub fn reset(&mut self) {
        self.state = WizardState::default();
        tracing::debug!("Booking wizard reset");
    }

    // -- edits --

    /// Merge one field into the draft and clear that field's error.
    ///
    /// A new date also clears the selected time, since slots depend on the
    /// date. A time not offered for the current date is rejected.
    pub fn update_field(&mut self, update: FieldUpdate) -> Result<(), CoreError> {
        let field = update.field();
        let draft = &mut self.state.draft;
        match update {
            FieldUpdate::Service(service) => draft.service = Some(service),
            FieldUpdate::Barber(barber) => draft.barber = Some(barber),
            FieldUpdate::Date(date) => {
                draft.date = Some(date);
                draft.time = None;
            }
            FieldUpdate::Time(time) => {
                let offered = slots::generate_slots_with(&self.config, draft.date);
                if !offered.contains(&time) {
                    tracing::warn!(time = %time, date = ?draft.date, "Rejected unoffered time slot");
                    return Err(CoreError::Validation(format!(
                        "Time '{time}' is not an available slot for the selected date"
                    )));
                }
                draft.time = Some(time);
            }
            FieldUpdate::Name(name) => draft.name = name,
            FieldUpdate::Email(email) => draft.email = email,
            FieldUpdate::Phone(raw) => draft.phone = phone::canonical_digits(&raw),
            FieldUpdate::Notes(notes) => draft.notes = notes,
        }
        self.state.errors.remove(&field);
        Ok(())
    }

    /// Select a service from the catalog.
    pub fn select_service(&mut self, id: DbId) -> Result<(), CoreError> {
        let service = self.catalog.service(id)?.clone();
        self.update_field(FieldUpdate::Service(service))
    }

    /// Select a barber from the roster.
    pub fn select_barber(&mut self, id: DbId) -> Result<(), CoreError> {
        let barber = self.catalog.barber(id)?.clone();
        self.update_field(FieldUpdate::Barber(BarberChoice::Barber(barber)))
    }

    /// Select "no preference" for the barber.
    pub fn select_no_preference(&mut self) -> Result<(), CoreError> {
        self.update_field(FieldUpdate::Barber(BarberChoice::NoPreference))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.update_field(FieldUpdate::Date(date))
    }

    pub fn select_time(&mut self, time: impl Into<SlotLabel>) -> Result<(), CoreError> {
        self.update_field(FieldUpdate::Time(time.into()))
    }

    /// Feed a keystroke from the phone input through the mask.
    ///
    /// Stores the canonical digits and returns the display value and caret
    /// for the UI to apply.
    pub fn input_phone(&mut self, raw: &str, caret: usize) -> PhoneEdit {
        let edit = phone::format_input(raw, caret);
        self.state.draft.phone = edit.digits.clone();
        self.state.errors.remove(&Field::Phone);
        edit
    }

    /// Backspace in the phone input.
    pub fn backspace_phone(&mut self, current: &str, caret: usize) -> PhoneEdit {
        let edit = phone::backspace(current, caret);
        self.state.draft.phone = edit.digits.clone();
        self.state.errors.remove(&Field::Phone);
        edit
    }

    // -- derived views --

    /// Slots offered for the selected date.
    pub fn available_slots(&self) -> Vec<SlotLabel> {
        slots::generate_slots_with(&self.config, self.state.draft.date)
    }

    /// Slots for the selected date with elapsed ones disabled.
    ///
    /// Empty until a date is selected.
    pub fn slot_options(&self, now: NaiveDateTime) -> Vec<SlotOption> {
        match self.state.draft.date {
            Some(date) => slots::slot_options(&self.config, date, now),
            None => Vec::new(),
        }
    }

    /// Calendar predicate: whether `date` may be picked on `today`.
    pub fn is_selectable_date(&self, date: NaiveDate, today: NaiveDate) -> bool {
        calendar::is_selectable_date_with(&self.config, date, today)
    }

    /// Stepper circles for the current step.
    pub fn stepper(&self, viewport: &dyn Viewport) -> Vec<StepIndicator> {
        viewport::stepper(self.state.step, viewport)
    }

    /// The completed draft as a submission record.
    ///
    /// Fails if any required selection is missing. Does not change state.
    pub fn finalize(&self) -> Result<BookingSubmission, CoreError> {
        BookingSubmission::from_draft(&self.state.draft)
    }
}
