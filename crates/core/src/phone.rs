//! Phone number input mask.
//!
//! Reformats raw input into digit pairs (`05 51 23 45 67`) and maps the caret
//! into the formatted string. Pure functions only: the UI applies the caret.
//! Caret positions are character offsets.

use serde::{Deserialize, Serialize};

/// Maximum number of digits kept in a phone number.
pub const MAX_PHONE_DIGITS: usize = 10;

/// Digits per display group.
const GROUP_SIZE: usize = 2;

/// Result of reformatting one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEdit {
    /// Canonical digit-only value, at most [`MAX_PHONE_DIGITS`] long.
    pub digits: String,
    /// Digits grouped in pairs separated by single spaces.
    pub display: String,
    /// Caret offset within `display`.
    pub caret: usize,
}

/// Strip everything but ASCII digits and truncate to [`MAX_PHONE_DIGITS`].
pub fn canonical_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Group canonical digits in pairs: `0551234567` -> `05 51 23 45 67`.
pub fn format_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Caret offset in the grouped string after `digits_before` digits.
///
/// One space sits after every completed pair that precedes the caret.
pub fn caret_for_digits(digits_before: usize) -> usize {
    digits_before + digits_before.saturating_sub(1) / GROUP_SIZE
}

/// Reformat `raw` (the input's value after an edit) with the caret at
/// `caret` in `raw`.
pub fn format_input(raw: &str, caret: usize) -> PhoneEdit {
    let digits_before = raw
        .chars()
        .take(caret)
        .filter(char::is_ascii_digit)
        .count();
    build(raw, digits_before)
}

/// Apply a backspace at `caret` to the displayed value `current`.
///
/// When the character before the caret is a group separator, the digit
/// before that separator is deleted instead, so backspace never stalls on
/// a space.
pub fn backspace(current: &str, caret: usize) -> PhoneEdit {
    let chars: Vec<char> = current.chars().collect();
    let caret = caret.min(chars.len());
    if caret == 0 {
        return format_input(current, 0);
    }

    let remove_at = if chars[caret - 1] == ' ' {
        // Skip over separators to the preceding digit, if any.
        match chars[..caret - 1].iter().rposition(|c| !c.is_whitespace()) {
            Some(idx) => idx,
            None => return format_input(current, caret),
        }
    } else {
        caret - 1
    };

    let digits_before = chars[..remove_at]
        .iter()
        .filter(|c| c.is_ascii_digit())
        .count();
    let edited: String = chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != remove_at)
        .map(|(_, c)| *c)
        .collect();
    build(&edited, digits_before)
}

fn build(raw: &str, digits_before: usize) -> PhoneEdit {
    let digits = canonical_digits(raw);
    let display = format_digits(&digits);
    let caret = caret_for_digits(digits_before.min(digits.len()));
    PhoneEdit {
        digits,
        display,
        caret,
    }
}
