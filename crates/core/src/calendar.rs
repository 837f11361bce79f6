//! Date predicates for the calendar widget.
//!
//! The widget itself is external; it asks these predicates which days to
//! enable and which months it may page to.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::BookingConfig;

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Last bookable day: the end of the month `months_ahead` after `today`'s.
pub fn end_of_booking_window(today: NaiveDate, months_ahead: u32) -> NaiveDate {
    month_start(today)
        .checked_add_months(Months::new(months_ahead))
        .map(month_end)
        .unwrap_or(NaiveDate::MAX)
}

/// `today <= date <= end of next month`, under the default schedule.
pub fn is_selectable_date(date: NaiveDate, today: NaiveDate) -> bool {
    is_selectable_date_with(&BookingConfig::default(), date, today)
}

/// Selectable-date predicate under an explicit schedule.
pub fn is_selectable_date_with(config: &BookingConfig, date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= end_of_booking_window(today, config.months_ahead)
}

/// Whether `date` belongs to the month the calendar is showing.
///
/// Grid cells spilling over from adjacent months are rendered muted.
pub fn is_in_displayed_month(date: NaiveDate, displayed: NaiveDate) -> bool {
    date.year() == displayed.year() && date.month() == displayed.month()
}

/// The month currently shown by the calendar, with paging bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedMonth {
    first: NaiveDate,
}

impl DisplayedMonth {
    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: month_start(date),
        }
    }

    /// First day of the displayed month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        is_in_displayed_month(date, self.first)
    }

    /// Paging back is allowed only past the current month.
    pub fn can_go_previous(&self, today: NaiveDate) -> bool {
        self.first > month_start(today)
    }

    /// Paging forward stops at the last bookable month.
    pub fn can_go_next(&self, config: &BookingConfig, today: NaiveDate) -> bool {
        self.first < month_start(end_of_booking_window(today, config.months_ahead))
    }

    /// Step one month back, if allowed.
    pub fn previous(&self, today: NaiveDate) -> Option<Self> {
        if !self.can_go_previous(today) {
            return None;
        }
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// Step one month forward, if allowed.
    pub fn next(&self, config: &BookingConfig, today: NaiveDate) -> Option<Self> {
        if !self.can_go_next(config, today) {
            return None;
        }
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
    }
}
