//! Check-in classification and the attendance reducer.

use serde::{Deserialize, Serialize};
use time::{Date, Time, UtcOffset};
use uuid::Uuid;

use crate::{
    error::ScheduleError,
    models::{
        attendance::{Attendance, AttendanceStatus, CheckInEvent},
        schedule::ScheduleDay,
    },
};

use super::{
    clock::{duration_hours, local_date_time},
    policy::Tolerances,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalStatus {
    TooEarly,
    OnTime,
    Late,
    TooLate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArrivalVerdict {
    pub valid: bool,
    /// Whole minutes from shift start, floored; negative when early.
    pub late_minutes: i64,
    pub status: ArrivalStatus,
}

impl ArrivalVerdict {
    pub fn is_late(&self) -> bool {
        matches!(self.status, ArrivalStatus::Late | ArrivalStatus::TooLate) && self.late_minutes > 0
    }
}

/// Classifies a check-in instant against the scheduled shift start.
pub fn classify_arrival(
    check_in: i64,
    shift_start: i64,
    tolerances: &Tolerances,
) -> ArrivalVerdict {
    let diff = check_in - shift_start;
    let early_window = i64::from(tolerances.early_arrival_minutes) * 60;
    let late_window = i64::from(tolerances.late_arrival_minutes) * 60;
    let minutes = diff.div_euclid(60);

    if diff < -early_window {
        ArrivalVerdict {
            valid: false,
            late_minutes: minutes,
            status: ArrivalStatus::TooEarly,
        }
    } else if diff <= 0 {
        ArrivalVerdict {
            valid: true,
            late_minutes: 0,
            status: ArrivalStatus::OnTime,
        }
    } else if diff <= late_window {
        ArrivalVerdict {
            valid: true,
            late_minutes: minutes,
            status: ArrivalStatus::Late,
        }
    } else {
        ArrivalVerdict {
            valid: false,
            late_minutes: minutes,
            status: ArrivalStatus::TooLate,
        }
    }
}

/// A check-in event resolved to the employee's local calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub employee_id: Uuid,
    pub date: Date,
    pub time: Time,
    pub instant: i64,
    /// Present only when the date is a scheduled work day.
    pub verdict: Option<ArrivalVerdict>,
}

impl CheckIn {
    pub fn resolve(
        event: &CheckInEvent,
        offset: UtcOffset,
        day: Option<&ScheduleDay>,
        tolerances: &Tolerances,
    ) -> Result<Self, ScheduleError> {
        let (date, time) = local_date_time(event.instant, offset)?;
        let verdict = day
            .filter(|d| d.is_work_day)
            .map(|d| classify_arrival(event.instant, d.unix_start, tolerances));
        Ok(Self {
            employee_id: event.employee_id,
            date,
            time,
            instant: event.instant,
            verdict,
        })
    }
}

/// Folds a check-in into the day's attendance record.
///
/// An open record (checked in, not out) is closed with this reading as the
/// check-out. Anything else is replaced by a fresh check-in.
pub fn merge_check_in(existing: Option<&Attendance>, check_in: &CheckIn) -> Attendance {
    match existing {
        Some(open) if open.is_open() => {
            let duration = open
                .check_in
                .map(|started| duration_hours(started, check_in.time));
            Attendance {
                check_out: Some(check_in.time),
                unix_check_out: Some(check_in.instant),
                duration_hours: duration,
                ..open.clone()
            }
        }
        _ => {
            let late = check_in.verdict.filter(ArrivalVerdict::is_late);
            Attendance {
                check_in: Some(check_in.time),
                unix_check_in: Some(check_in.instant),
                status: if late.is_some() {
                    AttendanceStatus::Late
                } else {
                    AttendanceStatus::Present
                },
                late_minutes: late.map(|v| v.late_minutes),
                ..Attendance::without_times(
                    check_in.employee_id,
                    check_in.date,
                    AttendanceStatus::Present,
                )
            }
        }
    }
}
