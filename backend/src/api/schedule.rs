use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use futures::{stream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{
        common::MonthParams,
        employee::{Employee, EmployeeFilter},
        schedule::{GenerateScheduleRequest, GeneratedSchedule, GenerationOutcome, ScheduleDay},
    },
    schedule::{generate_month, summarize, HolidayCalendar},
    store::Store,
    AppState,
};

use super::employees::fetch;

/// Employees generated at once by a bulk run.
const GENERATION_CONCURRENCY: usize = 8;

pub(crate) async fn holiday_calendar(store: &dyn Store) -> Result<HolidayCalendar> {
    Ok(HolidayCalendar::new(store.list_holidays().await?))
}

/// Generates a month, has it accepted by the submitter and only then stores
/// it, replacing any earlier version.
async fn commit_month(
    state: &AppState,
    employee: &Employee,
    calendar: &HolidayCalendar,
    year: i32,
    month: u8,
) -> Result<GeneratedSchedule> {
    let days = generate_month(employee, year, month, calendar, &state.settings)?;
    state.submitter.submit(employee.id, &days).await?;
    state
        .store
        .save_schedule(employee.id, year, month, &days)
        .await?;

    let summary = summarize(&days);
    tracing::info!(
        employee_id = %employee.id,
        year,
        month,
        work_days = summary.work_days,
        "Schedule committed"
    );

    Ok(GeneratedSchedule {
        employee_id: employee.id,
        year,
        month,
        summary,
        days,
    })
}

pub async fn generate_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GenerateScheduleRequest>,
) -> Result<Json<GeneratedSchedule>> {
    req.validate()?;

    let employee = fetch(state.store.as_ref(), id).await?;
    let calendar = holiday_calendar(state.store.as_ref()).await?;
    let generated = commit_month(&state, &employee, &calendar, req.year, req.month).await?;

    Ok(Json(generated))
}

/// Returns the stored month exactly as committed; never regenerates.
pub async fn load(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<ScheduleDay>>> {
    params.validate()?;

    store
        .load_schedule(id, params.year, params.month)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No schedule generated for this month".into()))
}

/// Generates the month for every active employee. One employee's failure does
/// not stop the others; each gets its own outcome.
pub async fn generate_all(
    State(state): State<AppState>,
    Json(req): Json<GenerateScheduleRequest>,
) -> Result<Json<Vec<GenerationOutcome>>> {
    req.validate()?;

    let employees = state.store.list_employees(&EmployeeFilter::active()).await?;
    let calendar = holiday_calendar(state.store.as_ref()).await?;
    tracing::info!(
        employees = employees.len(),
        year = req.year,
        month = req.month,
        "Generating schedules"
    );

    let (year, month) = (req.year, req.month);
    let state = &state;
    let calendar = &calendar;
    let mut outcomes: Vec<GenerationOutcome> = stream::iter(employees.into_iter())
        .map(|employee| async move {
            let employee = &employee;
            match commit_month(state, employee, calendar, year, month).await {
                Ok(generated) => GenerationOutcome {
                    employee_id: employee.id,
                    committed: true,
                    summary: Some(generated.summary),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(
                        employee_id = %employee.id,
                        "Schedule generation failed: {}",
                        e
                    );
                    GenerationOutcome {
                        employee_id: employee.id,
                        committed: false,
                        summary: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .buffer_unordered(GENERATION_CONCURRENCY)
        .collect()
        .await;

    outcomes.sort_by_key(|o| o.employee_id);
    Ok(Json(outcomes))
}
