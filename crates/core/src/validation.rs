//! Per-step booking validation.
//!
//! Field failures are returned as a map from [`Field`] to a user-facing
//! message; an empty map means the step may be left. Validation never
//! touches wizard state, the controller decides what to do with the map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::wizard::{BookingDraft, WizardStep};

/// Minimum length of the trimmed customer name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// `local@domain.tld` with a top-level segment of at least two letters.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("valid regex"));

/// National mobile numbers: `05`, `06` or `07` followed by eight digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[567][0-9]{8}$").expect("valid regex"));

pub const MSG_SERVICE_REQUIRED: &str = "Please select a service";
pub const MSG_BARBER_REQUIRED: &str = "Please select a barber or choose no preference";
pub const MSG_DATE_REQUIRED: &str = "Please select a date";
pub const MSG_TIME_REQUIRED: &str = "Please select a time";
pub const MSG_NAME_REQUIRED: &str = "Please enter your name";
pub const MSG_NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_PHONE_INVALID: &str =
    "Please enter a valid mobile number (05, 06 or 07 followed by 8 digits)";

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

/// The editable fields of a booking draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Service,
    Barber,
    Date,
    Time,
    Name,
    Email,
    Phone,
    Notes,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Self::Service,
        Self::Barber,
        Self::Date,
        Self::Time,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Notes,
    ];

    /// Parse a field key as used by the UI layer.
    pub fn from_key(key: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown booking field '{key}'. Must be one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }

    /// Stable key used in error maps and by the UI layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Barber => "barber",
            Self::Date => "date",
            Self::Time => "time",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Notes => "notes",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level failures for one step. Empty means valid.
pub type FieldErrors = BTreeMap<Field, String>;

// ---------------------------------------------------------------------------
// Step rules
// ---------------------------------------------------------------------------

/// Validate the fields gated by `step`.
///
/// Review and confirmation have no fields of their own and always pass.
pub fn validate(step: WizardStep, draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        WizardStep::Service => {
            if draft.service.is_none() {
                errors.insert(Field::Service, MSG_SERVICE_REQUIRED.to_string());
            }
        }
        WizardStep::Barber => {
            if draft.barber.is_none() {
                errors.insert(Field::Barber, MSG_BARBER_REQUIRED.to_string());
            }
        }
        WizardStep::DateTime => {
            if draft.date.is_none() {
                errors.insert(Field::Date, MSG_DATE_REQUIRED.to_string());
            }
            if draft.time.is_none() {
                errors.insert(Field::Time, MSG_TIME_REQUIRED.to_string());
            }
        }
        WizardStep::Details => {
            if let Some(msg) = name_error(&draft.name) {
                errors.insert(Field::Name, msg.to_string());
            }
            if !is_valid_email(&draft.email) {
                errors.insert(Field::Email, MSG_EMAIL_INVALID.to_string());
            }
            if !is_valid_phone(&draft.phone) {
                errors.insert(Field::Phone, MSG_PHONE_INVALID.to_string());
            }
        }
        WizardStep::Review | WizardStep::Confirmed => {}
    }
    errors
}

/// Validate by 1-based step number.
pub fn validate_step_number(step: u8, draft: &BookingDraft) -> Result<FieldErrors, CoreError> {
    Ok(validate(WizardStep::from_number(step)?, draft))
}

/// Whether `step` may be left with the current draft.
pub fn can_advance(step: WizardStep, draft: &BookingDraft) -> bool {
    validate(step, draft).is_empty()
}

fn name_error(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Some(MSG_NAME_REQUIRED)
    } else if trimmed.chars().count() < MIN_NAME_LENGTH {
        Some(MSG_NAME_TOO_SHORT)
    } else {
        None
    }
}

/// Email check used by the details step.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Mobile number check used by the details step.
///
/// Group separators from the input mask are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}
