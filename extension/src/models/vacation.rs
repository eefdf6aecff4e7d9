use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::date_key::DateKey;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date in vacation table"),
    }
}

/// School vacations in Mecklenburg-Vorpommern, school year 2024.
///
/// Evaluated at compile time; a typo in a date fails the build.
pub const MV_SCHOOL_VACATIONS_2024: [(&str, NaiveDate, NaiveDate); 6] = [
    ("Winterferien", ymd(2024, 2, 5), ymd(2024, 2, 16)),
    ("Osterferien", ymd(2024, 3, 25), ymd(2024, 4, 3)),
    ("Sommerferien", ymd(2024, 7, 22), ymd(2024, 8, 31)),
    ("Herbstferien", ymd(2024, 10, 7), ymd(2024, 10, 18)),
    ("Weihnachtsferien", ymd(2024, 12, 23), ymd(2025, 1, 3)),
    ("Pfingstferien", ymd(2024, 5, 17), ymd(2024, 5, 21)),
];

#[derive(Debug, Error)]
pub enum VacationTableError {
    #[error("invalid vacation table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vacation range {name:?} ends ({end}) before it starts ({start})")]
    Inverted {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Named, closed school-vacation interval. May cross a year boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRange {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationRange {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, VacationTableError> {
        let name = name.into();
        if start > end {
            return Err(VacationTableError::Inverted { name, start, end });
        }
        Ok(Self { name, start, end })
    }

    /// Every calendar day from `start` to `end`, both inclusive.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            days.push(cursor);
            match cursor.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }
        days
    }

    pub fn date_keys(&self) -> impl Iterator<Item = DateKey> {
        self.days().into_iter().map(DateKey::from_date)
    }
}

/// The compiled-in table as owned ranges.
pub fn default_vacation_table() -> Vec<VacationRange> {
    MV_SCHOOL_VACATIONS_2024
        .iter()
        .map(|(name, start, end)| VacationRange {
            name: (*name).to_string(),
            start: *start,
            end: *end,
        })
        .collect()
}

/// Parses a JSON array of `{ "name", "start", "end" }` objects.
pub fn parse_vacation_table(json: &str) -> Result<Vec<VacationRange>, VacationTableError> {
    let ranges: Vec<VacationRange> = serde_json::from_str(json)?;
    ranges
        .into_iter()
        .map(|range| VacationRange::new(range.name, range.start, range.end))
        .collect()
}

/// Expands every range day by day into one set of keys.
pub fn expand_vacation_days(ranges: &[VacationRange]) -> BTreeSet<DateKey> {
    ranges.iter().flat_map(VacationRange::date_keys).collect()
}
