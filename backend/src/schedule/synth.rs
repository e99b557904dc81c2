//! Synthetic attendance for demos and load testing.
//!
//! Randomness is injected so a seeded generator reproduces the same month.

use std::collections::HashSet;

use rand::Rng;
use time::{Date, Duration, Time};

use crate::{
    error::ScheduleError,
    models::{
        attendance::{Attendance, AttendanceStatus},
        employee::Employee,
    },
};

use super::{
    clock::{local_instant, month_days},
    complex::CycleSlot,
    pattern::is_work_day,
    policy::{Pattern, WorkSchedule},
    ScheduleSettings,
};

const LEAVE_THRESHOLD: f64 = 0.97;
const VACATION_THRESHOLD: f64 = 0.985;
const ABSENT_THRESHOLD: f64 = 0.95;
const LATE_THRESHOLD: f64 = 0.80;

/// Start time and length of the shift worked on one date.
struct PlannedShift {
    start: Time,
    hours: f64,
}

fn planned_shift(schedule: &WorkSchedule, date: Date) -> Option<PlannedShift> {
    match &schedule.pattern {
        Pattern::Complex(complex) => match complex.slot_for(date, schedule.anchor) {
            CycleSlot::Work { day, .. } => Some(PlannedShift {
                start: day.start,
                hours: day.work_hours,
            }),
            CycleSlot::Off { .. } => None,
        },
        _ => Some(PlannedShift {
            start: schedule.shift.start,
            hours: schedule.nominal_hours(),
        }),
    }
}

/// Draws one attendance record per day of the month.
///
/// Off days and work days after `today` become `day_off` records without
/// consuming randomness.
pub fn synthesize<R: Rng + ?Sized>(
    employee: &Employee,
    year: i32,
    month: u8,
    today: Date,
    settings: &ScheduleSettings,
    rng: &mut R,
) -> Result<Vec<Attendance>, ScheduleError> {
    let schedule = WorkSchedule::try_from(&employee.schedule)?;

    month_days(year, month)?
        .into_iter()
        .map(|date| {
            let shift = is_work_day(date, &schedule, settings.default_anchor)
                .then(|| planned_shift(&schedule, date))
                .flatten();
            match shift {
                Some(shift) if date <= today => {
                    Ok(draw_day(employee, date, &shift, settings, rng))
                }
                _ => Ok(Attendance::without_times(
                    employee.id,
                    date,
                    AttendanceStatus::DayOff,
                )),
            }
        })
        .collect()
}

fn draw_day<R: Rng + ?Sized>(
    employee: &Employee,
    date: Date,
    shift: &PlannedShift,
    settings: &ScheduleSettings,
    rng: &mut R,
) -> Attendance {
    let r: f64 = rng.gen();
    if r > LEAVE_THRESHOLD {
        let status = if r > VACATION_THRESHOLD {
            AttendanceStatus::Vacation
        } else {
            AttendanceStatus::SickLeave
        };
        return Attendance::without_times(employee.id, date, status);
    }
    if r > ABSENT_THRESHOLD {
        return Attendance::without_times(employee.id, date, AttendanceStatus::Absent);
    }

    let shift_minutes = (shift.hours * 60.0).round() as i64;
    let (status, arrival_offset, jitter): (AttendanceStatus, i64, i64) = if r > LATE_THRESHOLD {
        (
            AttendanceStatus::Late,
            rng.gen_range(5..50),
            rng.gen_range(-10..10),
        )
    } else {
        // Early arrivals stay on the shift's calendar date.
        let since_midnight = i64::from(shift.start.hour()) * 60 + i64::from(shift.start.minute());
        (
            AttendanceStatus::Present,
            -rng.gen_range(0..10).min(since_midnight),
            rng.gen_range(-5..10),
        )
    };
    let worked_minutes = shift_minutes + jitter;

    let scheduled = local_instant(date, shift.start, settings.utc_offset);
    let unix_check_in = scheduled + arrival_offset * 60;
    let check_in = shift.start + Duration::minutes(arrival_offset);

    Attendance {
        check_in: Some(check_in),
        check_out: Some(check_in + Duration::minutes(worked_minutes)),
        status,
        late_minutes: (status == AttendanceStatus::Late).then_some(arrival_offset),
        duration_hours: Some(worked_minutes as f64 / 60.0),
        unix_check_in: Some(unix_check_in),
        unix_check_out: Some(unix_check_in + worked_minutes * 60),
        ..Attendance::without_times(employee.id, date, status)
    }
}

/// Keeps every existing record and adds only the synthesized days that have no
/// record yet.
pub fn fill_missing(existing: &[Attendance], synthesized: Vec<Attendance>) -> Vec<Attendance> {
    let taken: HashSet<(uuid::Uuid, Date)> = existing
        .iter()
        .map(|a| (a.employee_id, a.date))
        .collect();
    synthesized
        .into_iter()
        .filter(|a| !taken.contains(&(a.employee_id, a.date)))
        .collect()
}
