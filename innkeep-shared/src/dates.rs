use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    Unparseable(String),
}

/// Parses a calendar date sent by the booking pages.
///
/// Plain `YYYY-MM-DD` is taken as-is. Full timestamps (the booking form sends
/// `toISOString()` output) are converted to UTC and truncated to their date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|_| DateError::Unparseable(value.to_string()))
}

/// Whole nights between two dates, regardless of their order.
pub fn nights_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// A queried or booked stay: check-in and check-out calendar dates.
///
/// Ordering is not enforced here; callers that need `check_in < check_out`
/// validate it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out }
    }

    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, DateError> {
        Ok(Self {
            check_in: parse_calendar_date(check_in)?,
            check_out: parse_calendar_date(check_out)?,
        })
    }

    /// Inclusive at both ends: an interval ending on our check-in day, or
    /// starting on our check-out day, overlaps.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.check_out && end >= self.check_in
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    pub fn is_ordered(&self) -> bool {
        self.check_in < self.check_out
    }
}
