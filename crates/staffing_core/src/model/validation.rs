//! Record-level invariant checks shared by project and employee models.

use chrono::{DateTime, SubsecRound, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record shape violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
    /// `end` is not strictly after `start`.
    InvalidInterval { start_ms: i64, end_ms: i64 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} is required"),
            Self::InvalidInterval { .. } => write!(f, "startDate must be lesser than endDate"),
        }
    }
}

impl Error for RecordValidationError {}

/// Drops sub-millisecond precision; the store keeps epoch milliseconds.
pub(crate) fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

pub(crate) fn ensure_not_blank(
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn ensure_strict_interval(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<(), RecordValidationError> {
    let Some(end) = end else {
        return Ok(());
    };

    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();
    if start_ms >= end_ms {
        return Err(RecordValidationError::InvalidInterval { start_ms, end_ms });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        ensure_not_blank, ensure_strict_interval, truncate_to_millis, RecordValidationError,
    };
    use chrono::{TimeZone, Utc};

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            ensure_not_blank("name", "  \t"),
            Err(RecordValidationError::BlankField("name"))
        );
        assert!(ensure_not_blank("name", "x").is_ok());
    }

    #[test]
    fn equal_bounds_are_not_a_valid_interval() {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let err = ensure_strict_interval(start, Some(start)).unwrap_err();
        assert_eq!(err.to_string(), "startDate must be lesser than endDate");
        assert!(ensure_strict_interval(start, None).is_ok());
    }

    #[test]
    fn truncation_keeps_whole_milliseconds() {
        let precise = Utc.timestamp_opt(1_641_000_000, 123_456_789).unwrap();
        let truncated = truncate_to_millis(precise);
        assert_eq!(truncated.timestamp_millis(), precise.timestamp_millis());
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
    }
}
