//! Wall-clock conversions for shift and training schedules.
//!
//! The API stores times of day as UTC `HH:MM` and dates as UTC midnight
//! instants; the UI works in the user's local offset.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use hrdesk_core::DomainError;

/// Reference day for time-of-day arithmetic.
fn epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

fn at_offset(naive: NaiveDateTime, offset: FixedOffset) -> Result<DateTime<Utc>, DomainError> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DomainError::validation(format!("ambiguous local time {naive}")))
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Local `HH:MM` to UTC `HH:MM` (wrapping past midnight).
pub fn to_utc_time(local: &str, offset: FixedOffset) -> Result<String, DomainError> {
    let naive = parse_time(local)
        .zip(epoch())
        .map(|(time, day)| day.and_time(time))
        .ok_or_else(|| DomainError::validation(format!("invalid time of day '{local}'")))?;
    let utc = at_offset(naive, offset)?;
    Ok(utc.format("%H:%M").to_string())
}

/// UTC `HH:MM` to local `HH:MM`. Unparseable input is returned unchanged.
pub fn from_utc_time(utc: &str, offset: FixedOffset) -> String {
    match parse_time(utc).zip(epoch()) {
        Some((time, day)) => Utc
            .from_utc_datetime(&day.and_time(time))
            .with_timezone(&offset)
            .format("%H:%M")
            .to_string(),
        None => utc.to_string(),
    }
}

/// Calendar date (or full timestamp) to the UTC-midnight instant of that date.
pub fn to_utc_date(local: &str) -> Result<String, DomainError> {
    let raw = local.trim();
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .map_err(|_| DomainError::validation(format!("invalid date '{local}'")))?,
    };
    Ok(to_iso(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))))
}

/// UTC instant to the local calendar date (`YYYY-MM-DD`). Unparseable input
/// is returned unchanged.
pub fn from_utc_date(utc: &str, offset: FixedOffset) -> String {
    match DateTime::parse_from_rfc3339(utc.trim()) {
        Ok(dt) => dt.with_timezone(&offset).format("%Y-%m-%d").to_string(),
        Err(_) => utc.to_string(),
    }
}

/// Local midnight of `date`, as a UTC instant.
pub fn local_day_start_utc(
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, DomainError> {
    at_offset(date.and_time(NaiveTime::MIN), offset)
}

/// Last millisecond (23:59:59.999) of `date` in local time, as a UTC instant.
pub fn local_day_end_utc(
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, DomainError> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| DomainError::validation("invalid end of day"))?;
    at_offset(date.and_time(end), offset)
}
