//! Conversions between ISO-8601 date strings and Julian day numbers.
//!
//! Index records store temporal extents as plain integer day counts so
//! they can be compared and range-filtered without timezone handling.
//! The conversion is calendar-day granular: any time-of-day component in
//! the input is truncated, so `day_number_to_approx_iso` is only an
//! approximate inverse of `iso_to_day_number` (same calendar day, always
//! midnight).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Offset between chrono's days-from-CE count and the Julian day number.
///
/// 2000-01-01 is day 730120 from CE and Julian day 2451545.
const JDN_OFFSET: i64 = 1_721_425;

/// Errors from date string and day number conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input was not a recognizable ISO-8601 date or datetime
    #[error("malformed ISO-8601 date: {0:?}")]
    Malformed(String),

    /// Day number does not correspond to a representable calendar date
    #[error("day number {0} out of representable range")]
    OutOfRange(i64),
}

/// Parse an ISO-8601 date or datetime string into a Julian day number.
///
/// Accepts plain dates (`2010-06-01`), naive datetimes
/// (`2010-06-01T12:30:00`) and RFC 3339 datetimes with an offset
/// (`2010-06-01T12:30:00Z`). Time-of-day and offset are discarded.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] if the input matches none of the
/// accepted forms.
pub fn iso_to_day_number(iso: &str) -> Result<i64, ParseError> {
    let date = parse_iso_date(iso)?;
    Ok(i64::from(date.num_days_from_ce()) + JDN_OFFSET)
}

/// Render a Julian day number as an approximate ISO-8601 datetime string.
///
/// The result always denotes midnight of the calendar day; any
/// time-of-day present before the forward conversion is lost.
///
/// # Errors
///
/// Returns [`ParseError::OutOfRange`] for day numbers outside chrono's
/// representable date range.
pub fn day_number_to_approx_iso(day_number: i64) -> Result<String, ParseError> {
    let days_from_ce = day_number - JDN_OFFSET;
    let days_from_ce =
        i32::try_from(days_from_ce).map_err(|_| ParseError::OutOfRange(day_number))?;
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce)
        .ok_or(ParseError::OutOfRange(day_number))?;
    Ok(format!("{}T00:00:00", date.format("%Y-%m-%d")))
}

fn parse_iso_date(iso: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = iso.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc().date());
    }
    Err(ParseError::Malformed(iso.to_string()))
}
