use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Date format used both for display and for the date search gate.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// One row of the tournament listing.
///
/// Dates are never missing: a `TBD` cell is resolved to the moment of
/// parsing, so such tournaments always read as upcoming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentRecord {
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub city: String,
    pub brochure: Option<String>,
}

impl TournamentRecord {
    #[must_use]
    pub fn start_display(&self) -> String {
        self.start_date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_display(&self) -> String {
        self.end_date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for TournamentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tournament: {}", self.name)?;
        writeln!(
            f,
            "Dates: {} to {}",
            self.start_display(),
            self.end_display()
        )?;
        writeln!(f, "City: {}", self.city)?;
        write!(
            f,
            "Brochure: {}",
            self.brochure.as_deref().unwrap_or("No brochure available")
        )
    }
}
