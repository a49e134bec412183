use std::sync::Arc;

use thiserror::Error;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, Weekday};
use time_tz::{Offset, TimeZone, Tz};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SalonTimeError {
    #[error("Invalid time format: {0:?}, expected HH:MM")]
    InvalidTimeFormat(Arc<str>),

    #[error("Invalid weekday: {0:?}")]
    InvalidWeekday(Arc<str>),
}

/// Parses a 24-hour `HH:MM` time of day into minutes since midnight.
pub fn time_to_minutes(hhmm: &str) -> Result<u16, SalonTimeError> {
    let invalid = || SalonTimeError::InvalidTimeFormat(hhmm.into());
    let (hours, minutes) = hhmm.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero padded `HH:MM`. Wraps at midnight.
pub fn minutes_to_time(minutes: u16) -> Arc<str> {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60).into()
}

pub fn parse_time_of_day(hhmm: &str) -> Result<Time, SalonTimeError> {
    time_to_minutes(hhmm).map(minutes_to_time_of_day)
}

pub fn time_of_day_to_minutes(time: Time) -> u16 {
    u16::from(time.hour()) * 60 + u16::from(time.minute())
}

pub fn minutes_to_time_of_day(minutes: u16) -> Time {
    Time::MIDNIGHT + Duration::minutes(i64::from(minutes % MINUTES_PER_DAY))
}

/// Absolute instant of a wall-clock time on `date` in the time zone `tz`.
///
/// Ambiguous local times resolve to the earlier instant. Local times inside a
/// daylight saving gap use the offset that was in effect before the gap.
pub fn combine(date: Date, time: Time, tz: &Tz) -> OffsetDateTime {
    let local = PrimitiveDateTime::new(date, time);
    let guess = local.assume_utc();
    // Offset transitions are never closer than a day apart.
    let before = tz.get_offset_utc(&(guess - Duration::days(1))).to_utc();
    let after = tz.get_offset_utc(&(guess + Duration::days(1))).to_utc();

    [before, after]
        .into_iter()
        .map(|offset| local.assume_offset(offset))
        .filter(|instant| tz.get_offset_utc(instant).to_utc() == instant.offset())
        .min()
        .unwrap_or_else(|| local.assume_offset(before))
}

/// Calendar date of `instant` as seen on a wall clock in `tz`.
pub fn local_date(instant: OffsetDateTime, tz: &Tz) -> Date {
    instant
        .to_offset(tz.get_offset_utc(&instant).to_utc())
        .date()
}

pub fn parse_weekday(name: &str) -> Result<Weekday, SalonTimeError> {
    match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        "sunday" | "sun" => Ok(Weekday::Sunday),
        _ => Err(SalonTimeError::InvalidWeekday(name.into())),
    }
}
