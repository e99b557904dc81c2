use time::Date;

use crate::{
    error::ScheduleError,
    models::{
        employee::Employee,
        schedule::{MonthSummary, Reconciliation, ScheduleDay},
    },
};

use super::{
    clock::month_days,
    complex,
    holiday::HolidayCalendar,
    pattern::is_work_day,
    policy::{Pattern, WorkSchedule},
    shift::{shift_for, standard_breaks},
    ScheduleSettings,
};

/// Generates one record per calendar day of `month` for `employee`, in
/// ascending date order.
///
/// The schedule policy is validated first, so a broken config never yields a
/// partial month.
pub fn generate_month(
    employee: &Employee,
    year: i32,
    month: u8,
    calendar: &HolidayCalendar,
    settings: &ScheduleSettings,
) -> Result<Vec<ScheduleDay>, ScheduleError> {
    let schedule = WorkSchedule::try_from(&employee.schedule)?;

    let days = match &schedule.pattern {
        Pattern::Complex(cycle) => {
            complex::expand(employee, &schedule, cycle, year, month, calendar, settings)?
        }
        _ => month_days(year, month)?
            .into_iter()
            .map(|date| simple_day(employee, &schedule, date, calendar, settings))
            .collect::<Result<Vec<_>, _>>()?,
    };

    tracing::debug!(
        employee_id = %employee.id,
        year,
        month,
        work_days = days.iter().filter(|d| d.is_work_day).count(),
        "Generated month schedule"
    );
    Ok(days)
}

fn simple_day(
    employee: &Employee,
    schedule: &WorkSchedule,
    date: Date,
    calendar: &HolidayCalendar,
    settings: &ScheduleSettings,
) -> Result<ScheduleDay, ScheduleError> {
    let is_holiday = calendar.is_holiday(date);
    if is_holiday || !is_work_day(date, schedule, settings.default_anchor) {
        return Ok(ScheduleDay::off(
            employee.id,
            employee.company_id,
            date,
            is_holiday,
        ));
    }

    let shift = shift_for(date, schedule, settings.utc_offset)?;
    let (day_breaks, overnight_breaks) = standard_breaks(&schedule.pattern, shift.start);
    Ok(ScheduleDay {
        is_work_day: true,
        overnight: schedule.forces_rollover(),
        unix_start: shift.start,
        unix_end: shift.end,
        plan_hours: schedule.plan_hours(),
        day_breaks,
        overnight_breaks,
        reconciliation: Some(Reconciliation::default()),
        ..ScheduleDay::off(employee.id, employee.company_id, date, false)
    })
}

/// Work-day, holiday and hour totals of a generated month.
///
/// `scheduled_hours` is measured from the shift instants, `planned_hours` sums
/// the configured plan hours.
pub fn summarize(days: &[ScheduleDay]) -> MonthSummary {
    days.iter().fold(MonthSummary::default(), |mut acc, day| {
        if day.is_holiday {
            acc.holidays += 1;
        }
        if day.is_work_day {
            acc.work_days += 1;
            acc.planned_hours += day.plan_hours;
            acc.scheduled_hours += day.shift_seconds() as f64 / 3600.0;
        }
        acc
    })
}
