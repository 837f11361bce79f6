//! Service catalog and barber roster supplied to the wizard.
//!
//! The wizard never fetches these itself; the embedding application loads
//! them (static lists or a backend query) and hands over a [`Catalog`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Key used for the "no preference" barber in submissions.
pub const NO_PREFERENCE_KEY: &str = "none";

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    /// Display label, e.g. `30 min`.
    pub duration: String,
    /// Display label, e.g. `25 €`.
    pub price: String,
}

/// A barber on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barber {
    pub id: DbId,
    pub name: String,
    /// Short specialty tag shown under the name.
    #[serde(default)]
    pub tag: String,
    /// Avatar initials. Derived from the name when absent.
    #[serde(default)]
    pub initials: String,
}

/// Staff preference for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarberChoice {
    /// Any available barber.
    NoPreference,
    Barber(Barber),
}

impl BarberChoice {
    /// Submission key: the barber id, or `"none"`.
    pub fn key(&self) -> String {
        match self {
            Self::NoPreference => NO_PREFERENCE_KEY.to_string(),
            Self::Barber(b) => b.id.to_string(),
        }
    }

    /// Name shown on the review step.
    pub fn display_name(&self) -> &str {
        match self {
            Self::NoPreference => "No preference",
            Self::Barber(b) => &b.name,
        }
    }
}

/// Initials for an avatar: first letter of the first two words, uppercased.
pub fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Services and barbers available for booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub barbers: Vec<Barber>,
}

impl Catalog {
    /// Build a catalog, filling missing initials and validating entries.
    pub fn new(services: Vec<Service>, barbers: Vec<Barber>) -> Result<Self, CoreError> {
        let mut catalog = Self { services, barbers };
        for barber in &mut catalog.barbers {
            if barber.initials.trim().is_empty() {
                barber.initials = initials_for(&barber.name);
            }
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON: `{"services": [...], "barbers": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: Catalog = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Malformed catalog JSON: {e}")))?;
        Self::new(raw.services, raw.barbers)
    }

    /// Check that every entry is named and ids are unique per list.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Service {} has an empty name",
                    service.id
                )));
            }
            if !seen.insert(service.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate service id {}",
                    service.id
                )));
            }
        }

        seen.clear();
        for barber in &self.barbers {
            if barber.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Barber {} has an empty name",
                    barber.id
                )));
            }
            if !seen.insert(barber.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate barber id {}",
                    barber.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a service by id.
    pub fn service(&self, id: DbId) -> Result<&Service, CoreError> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or(CoreError::NotFound {
                entity: "service",
                id,
            })
    }

    /// Look up a barber by id.
    pub fn barber(&self, id: DbId) -> Result<&Barber, CoreError> {
        self.barbers
            .iter()
            .find(|b| b.id == id)
            .ok_or(CoreError::NotFound { entity: "barber", id })
    }
}
