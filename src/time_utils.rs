// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar arithmetic in the dashboard's fixed UTC+9 civil calendar.
//!
//! All period boundaries are plain calendar dates. "Now" is read exactly
//! once per request (see [`today`]); everything else is pure.

use crate::error::AppError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};

/// Offset of the dashboard's civil calendar from UTC, in hours.
pub const UTC_OFFSET_HOURS: i64 = 9;

/// Suffix used when a calendar date has to be expressed as a timestamp.
pub const UTC_OFFSET_SUFFIX: &str = "+09:00";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar date of a UTC instant in UTC+9.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    (instant + Duration::hours(UTC_OFFSET_HOURS)).date_naive()
}

/// Current date in UTC+9.
pub fn today() -> NaiveDate {
    local_date(Utc::now())
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    if input.len() != 10 {
        return Err(AppError::InvalidDateFormat(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDateFormat(input.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Shift a date by `days` (negative moves backwards).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Like [`add_days`], but `None` instead of leaving chrono's date range.
pub fn checked_add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Monday of the ISO week containing `date`. Sunday belongs to the week
/// that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.day0()))
}

/// Last day of `date`'s month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    // 31 days after the 1st always lands in the following month
    let next_month = month_start(add_days(month_start(date), 31));
    add_days(next_month, -1)
}

/// Start of a calendar day in UTC+9, as an RFC3339 timestamp.
pub fn day_start_timestamp(date: NaiveDate) -> String {
    format!("{}T00:00:00{}", format_date(date), UTC_OFFSET_SUFFIX)
}

/// Last second of a calendar day in UTC+9, as an RFC3339 timestamp.
pub fn day_end_timestamp(date: NaiveDate) -> String {
    format!("{}T23:59:59{}", format_date(date), UTC_OFFSET_SUFFIX)
}
