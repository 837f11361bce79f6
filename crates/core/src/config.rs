//! Shop schedule configuration.

use chrono::{NaiveTime, Weekday};

use crate::error::CoreError;

/// Default opening time on regular days.
pub const DEFAULT_OPENING: (u32, u32) = (9, 0);

/// Default opening time on the short day.
pub const DEFAULT_SHORT_DAY_OPENING: (u32, u32) = (14, 0);

/// Default final bookable slot. No slot starts after it.
pub const DEFAULT_LAST_SLOT: (u32, u32) = (20, 0);

/// Default spacing between consecutive slots.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// Default number of months past the current one that can be booked.
pub const DEFAULT_MONTHS_AHEAD: u32 = 1;

/// Booking schedule loaded from environment variables.
///
/// `Default` reproduces the shop's published hours: 09:00 opening, Friday
/// opening at 14:00, last slot at 20:00, half-hour slots, bookable through
/// the end of next month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// Opening time on regular days.
    pub opening: NaiveTime,
    /// Weekday with shortened hours.
    pub short_day: Weekday,
    /// Opening time on the short day.
    pub short_day_opening: NaiveTime,
    /// Final bookable slot, inclusive.
    pub last_slot: NaiveTime,
    /// Minutes between slots.
    pub slot_interval_minutes: u32,
    /// Months after the current month that remain bookable.
    pub months_ahead: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opening: hm(DEFAULT_OPENING),
            short_day: Weekday::Fri,
            short_day_opening: hm(DEFAULT_SHORT_DAY_OPENING),
            last_slot: hm(DEFAULT_LAST_SLOT),
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            months_ahead: DEFAULT_MONTHS_AHEAD,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default |
    /// |---------------------------------|---------|
    /// | `BOOKING_OPENING_TIME`          | `09:00` |
    /// | `BOOKING_SHORT_DAY`             | `fri`   |
    /// | `BOOKING_SHORT_DAY_OPENING`     | `14:00` |
    /// | `BOOKING_LAST_SLOT`             | `20:00` |
    /// | `BOOKING_SLOT_INTERVAL_MINUTES` | `30`    |
    /// | `BOOKING_MONTHS_AHEAD`          | `1`     |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let opening = match lookup("BOOKING_OPENING_TIME") {
            Some(v) => parse_time("BOOKING_OPENING_TIME", &v)?,
            None => defaults.opening,
        };
        let short_day = match lookup("BOOKING_SHORT_DAY") {
            Some(v) => v.trim().parse::<Weekday>().map_err(|_| {
                CoreError::Config(format!("BOOKING_SHORT_DAY must be a weekday, got '{v}'"))
            })?,
            None => defaults.short_day,
        };
        let short_day_opening = match lookup("BOOKING_SHORT_DAY_OPENING") {
            Some(v) => parse_time("BOOKING_SHORT_DAY_OPENING", &v)?,
            None => defaults.short_day_opening,
        };
        let last_slot = match lookup("BOOKING_LAST_SLOT") {
            Some(v) => parse_time("BOOKING_LAST_SLOT", &v)?,
            None => defaults.last_slot,
        };
        let slot_interval_minutes = match lookup("BOOKING_SLOT_INTERVAL_MINUTES") {
            Some(v) => parse_u32("BOOKING_SLOT_INTERVAL_MINUTES", &v)?,
            None => defaults.slot_interval_minutes,
        };
        let months_ahead = match lookup("BOOKING_MONTHS_AHEAD") {
            Some(v) => parse_u32("BOOKING_MONTHS_AHEAD", &v)?,
            None => defaults.months_ahead,
        };

        let config = Self {
            opening,
            short_day,
            short_day_opening,
            last_slot,
            slot_interval_minutes,
            months_ahead,
        };
        config.validate()?;

        tracing::debug!(
            opening = %config.opening,
            short_day = %config.short_day,
            short_day_opening = %config.short_day_opening,
            last_slot = %config.last_slot,
            slot_interval_minutes = config.slot_interval_minutes,
            months_ahead = config.months_ahead,
            "Loaded booking configuration",
        );
        Ok(config)
    }

    /// Reject schedules that cannot produce any slot.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.slot_interval_minutes == 0 {
            return Err(CoreError::Config(
                "Slot interval must be at least one minute".to_string(),
            ));
        }
        if self.opening > self.last_slot {
            return Err(CoreError::Config(format!(
                "Opening time {} is after the last slot {}",
                self.opening.format("%H:%M"),
                self.last_slot.format("%H:%M")
            )));
        }
        if self.short_day_opening > self.last_slot {
            return Err(CoreError::Config(format!(
                "Short day opening {} is after the last slot {}",
                self.short_day_opening.format("%H:%M"),
                self.last_slot.format("%H:%M")
            )));
        }
        Ok(())
    }
}

fn hm((h, m): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_time(key: &str, value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| CoreError::Config(format!("{key} must be HH:MM, got '{value}'")))
}

fn parse_u32(key: &str, value: &str) -> Result<u32, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Config(format!("{key} must be a non-negative integer, got '{value}'")))
}
