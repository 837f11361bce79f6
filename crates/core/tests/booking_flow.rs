//! End-to-end booking wizard runs.
//!
//! Drives [`BookingWizard`] through full sessions the way the booking page
//! does, including submission through a recording [`BookingSink`].

use std::sync::Mutex;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;

use barbershop_core::catalog::{Barber, Catalog, Service};
use barbershop_core::error::CoreError;
use barbershop_core::submission::{confirm_and_submit, BookingSink, BookingSubmission};
use barbershop_core::validation::Field;
use barbershop_core::viewport::{IndicatorState, ViewportClass};
use barbershop_core::wizard::{BookingWizard, FieldUpdate, StepOutcome, WizardStep};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const CLASSIC_HAIRCUT: i64 = 1;
const BEARD_TRIM: i64 = 2;
const YANIS: i64 = 10;

fn shop_catalog() -> Catalog {
    Catalog::new(
        vec![
            Service {
                id: CLASSIC_HAIRCUT,
                name: "Classic Haircut".into(),
                duration: "30 min".into(),
                price: "20 €".into(),
            },
            Service {
                id: BEARD_TRIM,
                name: "Beard Trim".into(),
                duration: "20 min".into(),
                price: "12 €".into(),
            },
        ],
        vec![Barber {
            id: YANIS,
            name: "Yanis Meziane".into(),
            tag: "Fades".into(),
            initials: String::new(),
        }],
    )
    .expect("fixture catalog is valid")
}

/// 2026-10-19, a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// 2026-10-23, a Friday.
fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 23).unwrap()
}

/// Walk a fresh wizard to the details step with a haircut, no preference,
/// Monday 09:00.
fn wizard_at_details() -> BookingWizard {
    let mut wizard = BookingWizard::new(shop_catalog());
    wizard.select_service(CLASSIC_HAIRCUT).unwrap();
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Barber));
    wizard.select_no_preference().unwrap();
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::DateTime));
    wizard.select_date(monday()).unwrap();
    wizard.select_time("09:00").unwrap();
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Details));
    wizard
}

fn fill_details(wizard: &mut BookingWizard, name: &str, email: &str, phone: &str) {
    wizard.update_field(FieldUpdate::Name(name.into())).unwrap();
    wizard.update_field(FieldUpdate::Email(email.into())).unwrap();
    wizard.update_field(FieldUpdate::Phone(phone.into())).unwrap();
    wizard.update_field(FieldUpdate::Notes(String::new())).unwrap();
}

#[derive(Default)]
struct RecordingSink {
    received: Mutex<Vec<BookingSubmission>>,
    fail: bool,
}

#[async_trait]
impl BookingSink for RecordingSink {
    async fn submit(&self, booking: &BookingSubmission) -> Result<(), CoreError> {
        self.received.lock().unwrap().push(booking.clone());
        if self.fail {
            return Err(CoreError::Submission("backend unavailable".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Classic Haircut, no preference, Monday 09:00, "Jo" / a@b.co / 0551234567
/// passes details and confirms to the terminal step.
#[test]
fn classic_haircut_run_reaches_confirmation() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "0551234567");

    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Review));
    assert!(wizard.errors().is_empty());
    assert_eq!(wizard.confirm(), StepOutcome::Advanced(WizardStep::Confirmed));
    assert_eq!(wizard.step().to_number(), 6);

    let booking = wizard.finalize().unwrap();
    assert_eq!(booking.service_id, CLASSIC_HAIRCUT);
    assert_eq!(booking.barber_id, "none");
    assert_eq!(booking.iso_date(), "2026-10-19");
    assert_eq!(booking.time, "09:00");
    assert_eq!(booking.phone, "0551234567");
}

/// A 04 prefix is not a mobile number: details do not advance.
#[test]
fn invalid_phone_prefix_blocks_details() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "0441234567");

    assert_eq!(wizard.next(), StepOutcome::Blocked);
    assert_eq!(wizard.step(), WizardStep::Details);
    assert!(wizard.error(Field::Phone).is_some());
    assert!(wizard.error(Field::Name).is_none());
    assert!(wizard.error(Field::Email).is_none());

    // Fixing the phone clears its error and unblocks the step.
    wizard
        .update_field(FieldUpdate::Phone("06 12 34 56 78".into()))
        .unwrap();
    assert!(wizard.error(Field::Phone).is_none());
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Review));
}

#[test]
fn all_detail_errors_surface_together() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "J", "jo@example", "12345");

    assert_eq!(wizard.next(), StepOutcome::Blocked);
    assert!(wizard.error(Field::Name).is_some());
    assert!(wizard.error(Field::Email).is_some());
    assert!(wizard.error(Field::Phone).is_some());
}

#[test]
fn friday_slots_start_in_the_afternoon() {
    let mut wizard = BookingWizard::new(shop_catalog());
    wizard.select_date(friday()).unwrap();
    let slots = wizard.available_slots();
    assert!(!slots.contains(&"09:00".to_string()));
    assert!(slots.contains(&"14:00".to_string()));
    assert!(slots.contains(&"20:00".to_string()));
}

/// Going back to change the date drops the stale time and re-gates step 3.
#[test]
fn changing_date_after_going_back_requires_a_new_time() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Amina", "amina@mail.fr", "0712345678");

    assert_eq!(wizard.back(), WizardStep::DateTime);
    wizard.select_date(friday()).unwrap();
    assert_eq!(wizard.draft().time, None);

    assert_eq!(wizard.next(), StepOutcome::Blocked);
    assert!(wizard.error(Field::Time).is_some());
    assert!(wizard.error(Field::Date).is_none());

    wizard.select_time("14:30").unwrap();
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Details));
    // Details entered earlier survive the detour.
    assert_eq!(wizard.draft().name, "Amina");
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Review));
}

#[test]
fn reset_after_confirmation_starts_over() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "0551234567");
    let _ = wizard.next();
    let _ = wizard.confirm();
    assert_eq!(wizard.step(), WizardStep::Confirmed);

    wizard.reset();
    assert_eq!(wizard.step(), WizardStep::Service);
    assert!(wizard.draft().service.is_none());
    assert_eq!(wizard.next(), StepOutcome::Blocked);
}

#[test]
fn stepper_tracks_progress() {
    let wizard = wizard_at_details();
    let circles = wizard.stepper(&ViewportClass::Compact);
    assert_eq!(circles.len(), 5);
    assert_eq!(circles[3].state, IndicatorState::Current);
    assert_eq!(circles[3].label, Some("Your Details"));
    assert!(circles[0].label.is_none());
}

#[test]
fn specific_barber_is_submitted_by_id() {
    let mut wizard = BookingWizard::new(shop_catalog());
    wizard.select_service(BEARD_TRIM).unwrap();
    let _ = wizard.next();
    wizard.select_barber(YANIS).unwrap();
    let _ = wizard.next();
    wizard.select_date(monday()).unwrap();
    wizard.select_time("18:30").unwrap();
    let _ = wizard.next();
    fill_details(&mut wizard, "Karim", "karim@mail.com", "0611223344");
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::Review));

    let booking = wizard.finalize().unwrap();
    assert_eq!(booking.barber_id, "10");
    assert_eq!(booking.service_id, BEARD_TRIM);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confirm_and_submit_calls_sink_once() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "05 51 23 45 67");
    let _ = wizard.next();

    let sink = RecordingSink::default();
    let booking = confirm_and_submit(&mut wizard, &sink).await.unwrap();

    assert_eq!(wizard.step(), WizardStep::Confirmed);
    let received = sink.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], booking);
}

#[tokio::test]
async fn sink_failure_leaves_wizard_confirmed() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "0551234567");
    let _ = wizard.next();

    let sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };
    let result = confirm_and_submit(&mut wizard, &sink).await;

    assert_matches!(result, Err(CoreError::Submission(_)));
    assert_eq!(wizard.step(), WizardStep::Confirmed);
    assert_eq!(sink.received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_outside_review_does_not_touch_sink() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard, "Jo", "a@b.co", "0551234567");

    let sink = RecordingSink::default();
    let result = confirm_and_submit(&mut wizard, &sink).await;

    assert_matches!(result, Err(CoreError::Validation(_)));
    assert_eq!(wizard.step(), WizardStep::Details);
    assert!(sink.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn incomplete_draft_is_not_submitted() {
    let mut wizard = BookingWizard::new(shop_catalog());
    let sink = RecordingSink::default();
    let result = confirm_and_submit(&mut wizard, &sink).await;

    assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("service"));
    assert!(sink.received.lock().unwrap().is_empty());
}
