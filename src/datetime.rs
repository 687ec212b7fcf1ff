//! Day-of-year time conversion utilities.
//!
//! CE-QUAL-W2 encodes time as a fractional Julian day within a calendar
//! year (JDAY), where 1.0 is January 1 at midnight and the fractional part
//! is the time of day. These functions convert JDAY values into calendar
//! timestamps, anchored to a caller-supplied year.

use crate::error::{Result, W2Error};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Number of days in `year` (365, or 366 in a leap year).
pub fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// Convert fractional day-of-year values into timestamps anchored to `year`.
///
/// 1.0 maps to January 1 at 00:00; the fractional part is the time of day,
/// rounded to the nearest minute. Output preserves input length and order;
/// an empty input yields an empty output.
///
/// Values outside `1.0 <= v < days_in_year(year) + 1` fail with
/// [`W2Error::InvalidDayOfYear`]. Day 366.0 is therefore valid only in
/// leap years.
pub fn day_of_year_to_date(year: i32, values: &[f64]) -> Result<Vec<NaiveDateTime>> {
    let base = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(W2Error::InvalidDayOfYear { year, value: 1.0 })?
        .and_time(NaiveTime::MIN);
    let upper = (days_in_year(year) + 1) as f64;

    values
        .iter()
        .map(|&value| {
            // The !(>=) form also rejects NaN.
            if !(value >= 1.0) || value >= upper {
                return Err(W2Error::InvalidDayOfYear { year, value });
            }
            let whole_days = value.floor() as i64 - 1;
            let minutes = ((value - value.floor()) * 24.0 * 60.0).round() as i64;
            Ok(base + Duration::days(whole_days) + Duration::minutes(minutes))
        })
        .collect()
}

/// Round a timestamp to the nearest multiple of `round_to_secs` seconds.
///
/// `round_time(dt, 60)` rounds to the nearest minute, `round_time(dt, 3600)`
/// to the nearest hour. Halfway points round up, which can roll the result
/// into the next day.
pub fn round_time(dt: NaiveDateTime, round_to_secs: u32) -> NaiveDateTime {
    if round_to_secs == 0 {
        return dt;
    }
    let step = round_to_secs as i64;
    let secs = dt.time().num_seconds_from_midnight() as i64;
    let rem = secs % step;
    let rounded = if rem * 2 >= step {
        secs - rem + step
    } else {
        secs - rem
    };
    dt.date().and_time(NaiveTime::MIN) + Duration::seconds(rounded)
}

/// A heterogeneous date representation accepted by [`convert_to_datetime`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput<'a> {
    /// An already-correct timestamp, passed through unchanged.
    Timestamp(NaiveDateTime),
    /// A fractional day-of-year value, resolved against the anchor year.
    DayOfYear(f64),
    /// A date or date-time string in a recognized format.
    Text(&'a str),
}

/// Date-time string formats recognized by [`convert_to_datetime`], tried in order.
const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];
const TEXT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Convert a heterogeneous date representation into a canonical timestamp.
///
/// `year` anchors day-of-year input and is ignored for the other variants.
/// Unrecognized text fails with [`W2Error::DateTimeParse`].
pub fn convert_to_datetime(year: i32, input: DateInput<'_>) -> Result<NaiveDateTime> {
    match input {
        DateInput::Timestamp(dt) => Ok(dt),
        DateInput::DayOfYear(value) => {
            let dates = day_of_year_to_date(year, &[value])?;
            Ok(dates[0])
        }
        DateInput::Text(text) => {
            let trimmed = text.trim();
            for fmt in TEXT_DATETIME_FORMATS {
                if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                    return Ok(dt);
                }
            }
            for fmt in TEXT_DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                    return Ok(date.and_time(NaiveTime::MIN));
                }
            }
            Err(W2Error::DateTimeParse {
                value: trimmed.to_string(),
            })
        }
    }
}
