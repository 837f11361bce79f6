/// Catalog primary keys issued by the hosted backend.
pub type DbId = i64;

/// A bookable time label in 24-hour `HH:MM` form.
pub type SlotLabel = String;
