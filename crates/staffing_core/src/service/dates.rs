//! Request date parsing.
//!
//! Accepted inputs, all normalized to UTC:
//! - RFC 3339 (`2022-01-01T10:00:00Z`, `2022-01-01T10:00:00+02:00`)
//! - naive date-time (`2022-01-01T10:00:00`, `2022-01-01 10:00:00`)
//! - plain date (`2022-01-01`, midnight)

use crate::service::error::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses request date text. Returns `None` for blank or unrecognized text.
pub fn parse_date_input(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

/// Parses `raw` for `field`, failing with "`field` must be a date".
pub(crate) fn parse_date_field(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    parse_date_input(raw).ok_or(ValidationError::InvalidDate(field))
}
