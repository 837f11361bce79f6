//! `barbershop-core` -- booking wizard state machine for the barbershop site.
//!
//! Pure logic with no I/O of its own: slot generation, step validation, the
//! wizard controller, the phone input mask, and the seams (catalog, calendar,
//! viewport, submission sink) a UI layer plugs into.

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod phone;
pub mod slots;
pub mod submission;
pub mod types;
pub mod validation;
pub mod viewport;
pub mod wizard;
