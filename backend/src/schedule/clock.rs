//! Local clock helpers shared by the shift builder, the classifier and the
//! synthesizer.

use time::{
    macros::format_description, Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time,
    UtcOffset,
};

use crate::error::ScheduleError;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses a strict two-digit `HH:MM` local time.
pub fn parse_local_time(raw: &str) -> Result<Time, ScheduleError> {
    Time::parse(raw, format_description!("[hour]:[minute]"))
        .map_err(|_| ScheduleError::MalformedTime(raw.to_string()))
}

/// Epoch seconds of `date` at `time` in the given local reference.
pub fn local_instant(date: Date, time: Time, offset: UtcOffset) -> i64 {
    PrimitiveDateTime::new(date, time)
        .assume_offset(offset)
        .unix_timestamp()
}

/// Local calendar date and clock time of an instant.
pub fn local_date_time(instant: i64, offset: UtcOffset) -> Result<(Date, Time), ScheduleError> {
    let at = OffsetDateTime::from_unix_timestamp(instant)
        .map_err(|e| ScheduleError::InvalidDate(e.to_string()))?
        .to_offset(offset);
    Ok((at.date(), at.time()))
}

pub fn next_day(date: Date) -> Result<Date, ScheduleError> {
    date.next_day()
        .ok_or_else(|| ScheduleError::InvalidDate(format!("no day after {date}")))
}

/// Every date of a calendar month, ascending.
pub fn month_days(year: i32, month: u8) -> Result<Vec<Date>, ScheduleError> {
    let month = Month::try_from(month)
        .map_err(|_| ScheduleError::InvalidDate(format!("month {month} is not in 1..=12")))?;
    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|e| ScheduleError::InvalidDate(e.to_string()))?;
    let count = month.length(year);
    Ok((0..i64::from(count))
        .map(|offset| first.saturating_add(Duration::days(offset)))
        .collect())
}

pub fn first_of_month(date: Date) -> Date {
    date.saturating_sub(Duration::days(i64::from(date.day()) - 1))
}

fn minute_of_day(time: Time) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Minutes from `start` to `end`, wrapping past midnight when `end` is earlier.
pub fn span_minutes(start: Time, end: Time) -> i64 {
    let diff = minute_of_day(end) - minute_of_day(start);
    if diff < 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

/// Worked hours between two clock readings, corrected for midnight rollover.
pub fn duration_hours(check_in: Time, check_out: Time) -> f64 {
    span_minutes(check_in, check_out) as f64 / 60.0
}
