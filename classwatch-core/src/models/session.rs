//! Sessions and wire timestamp handling.
//!
//! The backend reports session times as naive wall-clock strings in a fixed
//! civil timezone (Europe/London). They are converted to UTC once, at the
//! parse boundary, so every comparison downstream is offset-free.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Europe::London;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Format of timestamps on the wire, e.g. `2026-08-12 16:30:00`.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single scheduled session of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub session_id: String,
    /// Session start time.
    pub start: DateTime<Utc>,
    /// Session end time.
    pub end: DateTime<Utc>,
}

/// Parses a backend timestamp string into UTC.
///
/// Ambiguous wall-clock times (the autumn DST overlap) resolve to the
/// earlier offset. Nonexistent times (the spring gap) are an error.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if the string does not match
/// [`WIRE_TIMESTAMP_FORMAT`] or names a nonexistent wall-clock time.
pub fn parse_wire_timestamp(value: &str) -> Result<DateTime<Utc>, CoreError> {
    let naive = NaiveDateTime::parse_from_str(value, WIRE_TIMESTAMP_FORMAT).map_err(|e| {
        CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    let local = naive
        .and_local_timezone(London)
        .earliest()
        .ok_or_else(|| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: "nonexistent wall-clock time".to_string(),
        })?;

    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_winter_timestamp() {
        // GMT: wall clock equals UTC
        let parsed = parse_wire_timestamp("2026-01-10 09:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_summer_timestamp() {
        // BST: wall clock is one hour ahead of UTC
        let parsed = parse_wire_timestamp("2026-07-10 09:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 7, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_ambiguous_timestamp_uses_earlier_offset() {
        // 2026-10-25 01:30 occurs twice in London; the earlier pass is BST
        let parsed = parse_wire_timestamp("2026-10-25 01:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert!(parse_wire_timestamp("2026-08-12T16:30:00Z").is_err());
        assert!(parse_wire_timestamp("not a timestamp").is_err());
    }

    #[test]
    fn test_parse_rejects_nonexistent_time() {
        // The spring-forward gap: 01:30 on 2026-03-29 never happens in London
        assert!(parse_wire_timestamp("2026-03-29 01:30:00").is_err());
    }
}
