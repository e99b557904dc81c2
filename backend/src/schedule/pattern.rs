//! Work/off decisions for a single date.

use time::Date;

use super::policy::{Pattern, WorkSchedule};

/// Whole days from `anchor` to `date`; negative before the anchor.
pub fn rotation_offset(date: Date, anchor: Date) -> i64 {
    (date - anchor).whole_days()
}

/// Whether `date` is a rostered work day under `schedule`.
///
/// Rotating patterns count from the schedule's own anchor, falling back to
/// `default_anchor`. Holidays are not considered here.
pub fn is_work_day(date: Date, schedule: &WorkSchedule, default_anchor: Date) -> bool {
    match &schedule.pattern {
        Pattern::FixedWeekly(week) | Pattern::Flexible(week) => week.contains(date.weekday()),
        Pattern::Rotating { rotation, .. } => {
            let anchor = schedule.anchor.unwrap_or(default_anchor);
            rotation.is_on(rotation_offset(date, anchor))
        }
        Pattern::Complex(complex) => complex.slot_for(date, schedule.anchor).is_work(),
    }
}
