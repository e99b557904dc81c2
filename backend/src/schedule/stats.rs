use crate::models::{
    attendance::{Attendance, AttendanceStatus, AttendanceStats},
    schedule::ScheduleDay,
};

use super::clock::duration_hours;

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Hours between check-in and check-out. Instants win over clock readings so
/// full-day shifts are not folded to zero.
fn worked_hours(record: &Attendance) -> Option<f64> {
    match (record.unix_check_in, record.unix_check_out) {
        (Some(start), Some(end)) if end >= start => Some((end - start) as f64 / 3600.0),
        _ => Some(duration_hours(record.check_in?, record.check_out?)),
    }
}

/// Scheduled length of the shift the record belongs to: the generated work
/// day when there is one, `nominal_hours` otherwise.
fn scheduled_hours(days: &[ScheduleDay], record: &Attendance, nominal_hours: f64) -> f64 {
    days.iter()
        .find(|d| d.date == record.date && d.is_work_day)
        .map_or(nominal_hours, |d| d.shift_seconds() as f64 / 3600.0)
}

/// Aggregates a month of attendance. Overtime is the excess of each worked
/// day over its own scheduled shift, summed; short days do not offset long
/// ones.
pub fn calculate_stats(
    days: &[ScheduleDay],
    nominal_hours: f64,
    records: &[Attendance],
) -> AttendanceStats {
    let mut stats = AttendanceStats::default();
    for record in records {
        match record.status {
            AttendanceStatus::Absent => {
                stats.absent_count += 1;
                continue;
            }
            AttendanceStatus::Late => stats.late_count += 1,
            _ => {}
        }
        if let Some(hours) = worked_hours(record) {
            stats.total_hours += hours;
            stats.overtime_hours +=
                (hours - scheduled_hours(days, record, nominal_hours)).max(0.0);
        }
    }

    stats.overtime_hours = round_tenth(stats.overtime_hours);
    stats.total_hours = round_tenth(stats.total_hours);
    stats
}
