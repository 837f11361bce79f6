//! Viewport classification and the step indicator.
//!
//! Layout breakpoints are injected rather than read from global window
//! state, so the stepper can be computed without a browser.

use serde::{Deserialize, Serialize};

use crate::wizard::{WizardStep, VISIBLE_STEPS};

/// Coarse layout class reported by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    /// Narrow screens: the stepper shows a label on the current circle only.
    Compact,
    Regular,
}

/// Maximum width in CSS pixels still classified as compact.
pub const COMPACT_MAX_WIDTH: u32 = 640;

impl ViewportClass {
    /// Classify a viewport width.
    pub fn from_width(width: u32) -> Self {
        if width <= COMPACT_MAX_WIDTH {
            Self::Compact
        } else {
            Self::Regular
        }
    }
}

/// Source of the current layout class.
pub trait Viewport {
    fn classify(&self) -> ViewportClass;
}

impl Viewport for ViewportClass {
    fn classify(&self) -> ViewportClass {
        *self
    }
}

/// Progress state of one stepper circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    Completed,
    Current,
    Upcoming,
}

/// One circle of the stepper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub state: IndicatorState,
}

/// The visible stepper for `current`.
///
/// Only the five interactive steps get a circle; on the terminal step all
/// of them read as completed.
pub fn stepper(current: WizardStep, viewport: &dyn Viewport) -> Vec<StepIndicator> {
    let compact = viewport.classify() == ViewportClass::Compact;
    let current_number = current.to_number();

    WizardStep::ALL
        .into_iter()
        .take(VISIBLE_STEPS as usize)
        .map(|step| {
            let number = step.to_number();
            let state = match number.cmp(&current_number) {
                std::cmp::Ordering::Less => IndicatorState::Completed,
                std::cmp::Ordering::Equal => IndicatorState::Current,
                std::cmp::Ordering::Greater => IndicatorState::Upcoming,
            };
            let label = (!compact || state == IndicatorState::Current).then(|| step.label());
            StepIndicator {
                number,
                label,
                state,
            }
        })
        .collect()
}
