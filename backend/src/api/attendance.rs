use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rand::{rngs::StdRng, SeedableRng};
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::Result,
    models::{
        attendance::{
            Attendance, AttendanceStats, CheckInEvent, CheckInResponse, SynthesisSummary,
            SynthesizeRequest,
        },
        common::MonthParams,
        employee::{Employee, EmployeeFilter},
        schedule::ScheduleDay,
    },
    schedule::{
        calculate_stats, fill_missing, generate_month, merge_check_in,
        synthesize as synthesize_month, CheckIn, HolidayCalendar, ScheduleSettings, WorkSchedule,
    },
    store::{stored_day, Store},
};

use super::{employees::fetch, schedule::holiday_calendar};

/// The schedule day for `date`: the committed one if the month was generated,
/// otherwise computed on the fly without storing it.
async fn schedule_day(
    store: &dyn Store,
    employee: &Employee,
    calendar: &HolidayCalendar,
    date: Date,
    settings: &ScheduleSettings,
) -> Result<Option<ScheduleDay>> {
    if let Some(day) = stored_day(store, employee.id, date).await? {
        return Ok(Some(day));
    }
    let days = generate_month(
        employee,
        date.year(),
        u8::from(date.month()),
        calendar,
        settings,
    )?;
    Ok(days.into_iter().find(|d| d.date == date))
}

pub async fn check_in(
    State(store): State<Arc<dyn Store>>,
    State(settings): State<ScheduleSettings>,
    Json(event): Json<CheckInEvent>,
) -> Result<Json<CheckInResponse>> {
    event.validate()?;

    let employee = fetch(store.as_ref(), event.employee_id).await?;
    let schedule = WorkSchedule::try_from(&employee.schedule)?;
    let calendar = holiday_calendar(store.as_ref()).await?;

    let reading = CheckIn::resolve(&event, settings.utc_offset, None, &schedule.tolerances)?;

    // An overnight shift still open from the day before takes this reading as
    // its check-out.
    if let Some(previous) = reading.date.previous_day() {
        if let Some(open) = store
            .get_attendance(employee.id, previous)
            .await?
            .filter(Attendance::is_open)
        {
            let overnight = schedule_day(store.as_ref(), &employee, &calendar, previous, &settings)
                .await?
                .is_some_and(|d| d.is_work_day && d.overnight);
            if overnight {
                let attendance = merge_check_in(Some(&open), &reading);
                store.upsert_attendance(&attendance).await?;
                tracing::info!(
                    employee_id = %employee.id,
                    date = %previous,
                    "Overnight shift closed"
                );
                return Ok(Json(CheckInResponse {
                    attendance,
                    verdict: None,
                }));
            }
        }
    }

    let day = schedule_day(store.as_ref(), &employee, &calendar, reading.date, &settings).await?;
    let reading = CheckIn::resolve(
        &event,
        settings.utc_offset,
        day.as_ref(),
        &schedule.tolerances,
    )?;
    let existing = store.get_attendance(employee.id, reading.date).await?;
    let attendance = merge_check_in(existing.as_ref(), &reading);
    store.upsert_attendance(&attendance).await?;

    let verdict = if attendance.check_out.is_some() {
        None
    } else {
        reading.verdict
    };
    if let Some(v) = verdict.filter(|v| !v.valid) {
        tracing::warn!(
            employee_id = %employee.id,
            late_minutes = v.late_minutes,
            "Check-in outside the arrival window: {:?}",
            v.status
        );
    }

    Ok(Json(CheckInResponse {
        attendance,
        verdict,
    }))
}

pub async fn list(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<Attendance>>> {
    params.validate()?;
    fetch(store.as_ref(), id).await?;

    Ok(Json(
        store.list_attendance(id, params.year, params.month).await?,
    ))
}

pub async fn stats(
    State(store): State<Arc<dyn Store>>,
    State(settings): State<ScheduleSettings>,
    Path(id): Path<Uuid>,
    Query(params): Query<MonthParams>,
) -> Result<Json<AttendanceStats>> {
    params.validate()?;
    let employee = fetch(store.as_ref(), id).await?;
    let schedule = WorkSchedule::try_from(&employee.schedule)?;

    let days = match store.load_schedule(id, params.year, params.month).await? {
        Some(days) => days,
        None => {
            let calendar = holiday_calendar(store.as_ref()).await?;
            generate_month(&employee, params.year, params.month, &calendar, &settings)?
        }
    };
    let records = store.list_attendance(id, params.year, params.month).await?;

    Ok(Json(calculate_stats(&days, schedule.nominal_hours(), &records)))
}

/// Fills the month with synthetic attendance for every active employee,
/// leaving existing records untouched.
pub async fn synthesize(
    State(store): State<Arc<dyn Store>>,
    State(settings): State<ScheduleSettings>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<SynthesisSummary>> {
    req.validate()?;

    let today = OffsetDateTime::now_utc().to_offset(settings.utc_offset).date();
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let employees = store.list_employees(&EmployeeFilter::active()).await?;
    let mut summary = SynthesisSummary {
        employees: employees.len(),
        ..SynthesisSummary::default()
    };

    for employee in &employees {
        let drawn = synthesize_month(employee, req.year, req.month, today, &settings, &mut rng);
        let drawn = match drawn {
            Ok(drawn) => drawn,
            Err(e) => {
                tracing::warn!(employee_id = %employee.id, "Skipping attendance synthesis: {}", e);
                summary.skipped.push(employee.id);
                continue;
            }
        };
        let existing = store.list_attendance(employee.id, req.year, req.month).await?;
        for record in fill_missing(&existing, drawn) {
            store.upsert_attendance(&record).await?;
            summary.created += 1;
        }
    }

    tracing::info!(
        employees = summary.employees,
        created = summary.created,
        "Attendance synthesized"
    );
    Ok(Json(summary))
}
