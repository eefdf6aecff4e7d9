use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Longest month lengths, leap years included, so `02-29` is a valid key.
const MAX_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    #[error("month out of range: {0}")]
    Month(u32),
    #[error("day {day} out of range for month {month}")]
    Day { month: u32, day: u32 },
    #[error("expected MM-DD, got {0:?}")]
    Format(String),
}

/// Year-independent calendar day, formatted as `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    month: u32,
    day: u32,
}

impl DateKey {
    pub fn new(month: u32, day: u32) -> Result<Self, DateKeyError> {
        if !(1..=12).contains(&month) {
            return Err(DateKeyError::Month(month));
        }
        let max_day = MAX_DAYS[(month - 1) as usize];
        if !(1..=max_day).contains(&day) {
            return Err(DateKeyError::Day { month, day });
        }
        Ok(Self { month, day })
    }

    /// Drops the year of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || DateKeyError::Format(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(format_err)?;
        if month.len() != 2
            || day.len() != 2
            || !month.bytes().all(|b| b.is_ascii_digit())
            || !day.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(format_err());
        }
        let month: u32 = month.parse().map_err(|_| format_err())?;
        let day: u32 = day.parse().map_err(|_| format_err())?;
        DateKey::new(month, day)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}
