//! Calendar date parsing and arithmetic.
//!
//! Compliance documents carry plain calendar dates. The hosted store hands
//! them back either as `YYYY-MM-DD` or, for timestamp columns, as RFC 3339
//! strings; both are accepted here and anything else is rejected with a
//! [`MalformedDateError`].

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// Canonical date format used in records and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted date string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed date in `{field}`: {value:?}")]
pub struct MalformedDateError {
    /// Name of the field holding the value.
    pub field: String,
    /// The raw value as received.
    pub value: String,
}

impl MalformedDateError {
    /// Create a new error for `field`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Parse a required date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, MalformedDateError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| MalformedDateError::new(field, value))
}

/// Parse an optional date. Missing and blank values are `None`.
pub fn parse_optional_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, MalformedDateError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(field, v).map(Some),
    }
}

/// Signed number of days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
