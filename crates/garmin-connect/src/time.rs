// ABOUTME: Date and timestamp helpers for Garmin payloads (local/GMT stamps, calendar dates)
// ABOUTME: Accepts the loose ISO-8601 variants users type and renders Garmin's fixed formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::errors::{ConnectError, ConnectResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a `YYYY-MM-DD` calendar date
///
/// # Errors
///
/// Returns [`ConnectError::InvalidArgument`] for malformed dates
pub fn parse_date(value: &str) -> ConnectResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ConnectError::invalid_argument(format!("invalid date '{value}', expected YYYY-MM-DD"))
    })
}

/// Format a calendar date as `YYYY-MM-DD`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's local calendar date
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a local timestamp, defaulting to now when absent
///
/// Offsets in RFC 3339 input are converted to local time.
///
/// # Errors
///
/// Returns [`ConnectError::InvalidArgument`] for unrecognized input
pub fn parse_local(value: Option<&str>) -> ConnectResult<NaiveDateTime> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Local::now().naive_local());
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Local).naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ConnectError::invalid_argument(format!(
        "invalid timestamp '{raw}', expected ISO-8601 such as 2024-01-15T07:30:00"
    )))
}

/// Convert a local wall-clock time to UTC
///
/// # Errors
///
/// Returns an error for wall-clock times skipped by a DST transition
pub fn local_to_utc(local: NaiveDateTime) -> ConnectResult<DateTime<Utc>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| {
            ConnectError::invalid_argument(format!("{local} does not exist in the local time zone"))
        })
}

/// Garmin's `YYYY-MM-DDTHH:MM:SS.00` stamp
#[must_use]
pub fn garmin_stamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S.00").to_string()
}

/// Microsecond precision stamp used by the hydration log
#[must_use]
pub fn precise_stamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_common_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        assert_eq!(parse_local(Some("2024-01-15T07:30:00")).unwrap(), expected);
        assert_eq!(parse_local(Some("2024-01-15T07:30:00.00")).unwrap(), expected);
        assert_eq!(parse_local(Some("2024-01-15 07:30:00")).unwrap(), expected);
        assert_eq!(parse_local(Some("2024-01-15T07:30")).unwrap(), expected);
        assert_eq!(
            parse_local(Some("2024-01-15")).unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_local(Some("yesterday")).is_err());
    }

    #[test]
    fn empty_means_now() {
        let before = Local::now().naive_local();
        let parsed = parse_local(Some("")).unwrap();
        assert!(parsed >= before - Duration::seconds(1));
    }

    #[test]
    fn stamps() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(7, 30, 5)
            .unwrap();
        assert_eq!(garmin_stamp(at), "2024-01-15T07:30:05.00");
        assert_eq!(precise_stamp(at), "2024-01-15T07:30:05.000000");
    }

    #[test]
    fn dates() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("2024-02-30").is_err());
    }
}
