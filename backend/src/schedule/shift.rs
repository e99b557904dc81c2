//! Absolute shift and break instants.

use serde::Serialize;
use time::{Date, Time, UtcOffset};

use crate::{error::ScheduleError, models::schedule::Break};

use super::{
    clock::{local_instant, next_day},
    policy::{BreakWindow, Pattern, Rotation, WorkSchedule},
};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;

/// A shift as a pair of epoch-second instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub start: i64,
    pub end: i64,
}

/// Builds the shift starting on `date`.
///
/// The end moves to the next calendar day when `force_rollover` is set or the
/// end clock time is earlier than the start clock time.
pub fn build_shift(
    date: Date,
    start: Time,
    end: Time,
    force_rollover: bool,
    offset: UtcOffset,
) -> Result<Shift, ScheduleError> {
    let end_date = if force_rollover || end < start {
        next_day(date)?
    } else {
        date
    };
    Ok(Shift {
        start: local_instant(date, start, offset),
        end: local_instant(end_date, end, offset),
    })
}

/// The nominal shift of a simple schedule on `date`.
pub fn shift_for(
    date: Date,
    schedule: &WorkSchedule,
    offset: UtcOffset,
) -> Result<Shift, ScheduleError> {
    build_shift(
        date,
        schedule.shift.start,
        schedule.shift.end,
        schedule.forces_rollover(),
        offset,
    )
}

/// Break instants anchored to the shift date, or to the day after it for the
/// overnight segment, whatever their clock values.
pub fn anchored_breaks(
    date: Date,
    windows: &[BreakWindow],
    following_day: bool,
    offset: UtcOffset,
) -> Result<Vec<Break>, ScheduleError> {
    let day = if following_day { next_day(date)? } else { date };
    Ok(windows
        .iter()
        .map(|w| {
            Break::planned(
                w.name.clone(),
                local_instant(day, w.start, offset),
                local_instant(day, w.end, offset),
            )
        })
        .collect())
}

fn relative_break(name: &str, shift_start: i64, after: i64, length: i64) -> Break {
    Break::planned(name, shift_start + after, shift_start + after + length)
}

/// Breaks laid out relative to the shift start for the simple patterns.
/// Returns `(day_breaks, overnight_breaks)`.
pub fn standard_breaks(pattern: &Pattern, shift_start: i64) -> (Vec<Break>, Vec<Break>) {
    let half_hour = 30 * MINUTE;
    match pattern {
        Pattern::FixedWeekly(_) => (
            vec![relative_break("lunch_1", shift_start, 4 * HOUR, HOUR)],
            Vec::new(),
        ),
        Pattern::Rotating {
            rotation: Rotation::TwoOnTwoOff,
            ..
        } => (
            vec![
                relative_break("lunch_1", shift_start, 4 * HOUR, half_hour),
                relative_break("lunch_2", shift_start, 8 * HOUR, half_hour),
            ],
            Vec::new(),
        ),
        Pattern::Rotating {
            rotation: Rotation::OneOnThreeOff,
            ..
        } => (
            vec![
                relative_break("lunch_1", shift_start, 3 * HOUR, half_hour),
                relative_break("lunch_2", shift_start, 5 * HOUR, half_hour),
            ],
            vec![
                relative_break("lunch_1", shift_start, 18 * HOUR, half_hour),
                relative_break("lunch_2", shift_start, 21 * HOUR, half_hour),
            ],
        ),
        Pattern::Flexible(_) | Pattern::Complex(_) => (Vec::new(), Vec::new()),
    }
}
