//! Calendar arithmetic for lease periods
//!
//! Lease terms are expressed in whole calendar months. Advancing a date by
//! months clamps to the last valid day of the target month, so
//! 2026-01-31 + 1 month is 2026-02-28 and never rolls into March.

use chrono::{Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the owner's jurisdiction
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA zone name such as `America/New_York`
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(name.to_string()))
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date {date} advanced by {months} months is out of range")]
    OutOfRange { date: String, months: u32 },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Advances `date` by whole calendar months
///
/// When the day of month does not exist in the target month the result is
/// the last day of that month. Returns `None` past the supported calendar.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`)
pub fn parse_date(input: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| TemporalError::InvalidDate(input.to_string()))
}

/// An inclusive calendar date range spanning whole months
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds the range `start ..= start + months`
    pub fn from_months(start: NaiveDate, months: u32) -> Result<Self, TemporalError> {
        let end = add_months(start, months).ok_or_else(|| TemporalError::OutOfRange {
            date: start.to_string(),
            months,
        })?;
        Ok(Self { start, end })
    }
}
