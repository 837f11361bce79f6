//! Bookable time slot generation.
//!
//! Slots are recomputed on every call; nothing is cached, so a config change
//! or a different date always yields a fresh sequence.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::BookingConfig;
use crate::types::SlotLabel;

/// Slot label format (24-hour clock).
pub const SLOT_FORMAT: &str = "%H:%M";

/// Bookable slot labels for `date` using the shop's default hours.
///
/// With no date the regular (non short day) window is used.
pub fn generate_slots(date: Option<NaiveDate>) -> Vec<SlotLabel> {
    generate_slots_with(&BookingConfig::default(), date)
}

/// Bookable slot labels for `date` under an explicit schedule.
pub fn generate_slots_with(config: &BookingConfig, date: Option<NaiveDate>) -> Vec<SlotLabel> {
    let opening = opening_for(config, date);
    let start = minutes_of(opening);
    let end = minutes_of(config.last_slot);
    let step = config.slot_interval_minutes.max(1);

    (start..=end)
        .step_by(step as usize)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

/// Whether `date` falls on the configured short day.
pub fn is_short_day(config: &BookingConfig, date: NaiveDate) -> bool {
    date.weekday() == config.short_day
}

fn opening_for(config: &BookingConfig, date: Option<NaiveDate>) -> NaiveTime {
    match date {
        Some(d) if is_short_day(config, d) => config.short_day_opening,
        _ => config.opening,
    }
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parse a slot label back into a time of day.
pub fn parse_slot(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label, SLOT_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// A slot as rendered in the time picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    pub time: SlotLabel,
    /// Shown but not selectable.
    pub disabled: bool,
}

/// Whether a slot on `date` has already started relative to `now`.
///
/// Only slots on today's date can be past; a slot starting exactly at `now`
/// is still selectable. Unparsable labels are never considered past.
pub fn is_slot_past(date: NaiveDate, label: &str, now: NaiveDateTime) -> bool {
    if date != now.date() {
        return false;
    }
    parse_slot(label).is_some_and(|t| t < now.time())
}

/// Slots for `date` with past ones flagged as disabled.
///
/// This is a display affordance only; the step validator does not reject
/// a past slot.
pub fn slot_options(config: &BookingConfig, date: NaiveDate, now: NaiveDateTime) -> Vec<SlotOption> {
    generate_slots_with(config, Some(date))
        .into_iter()
        .map(|time| {
            let disabled = is_slot_past(date, &time, now);
            SlotOption { time, disabled }
        })
        .collect()
}
