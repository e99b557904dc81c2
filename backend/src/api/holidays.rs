use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use time::Month;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        common::YearParams,
        holiday::{CreateHolidayRequest, Holiday},
    },
    schedule::HolidayCalendar,
    store::Store,
};

/// Raw holiday entries, or with `?year=` the dated holidays of that year.
pub async fn list(
    State(store): State<Arc<dyn Store>>,
    Query(params): Query<YearParams>,
) -> Result<Response> {
    let holidays = store.list_holidays().await?;
    Ok(match params.year {
        Some(year) => Json(HolidayCalendar::new(holidays).holidays_for_year(year)).into_response(),
        None => Json(holidays).into_response(),
    })
}

pub async fn create(
    State(store): State<Arc<dyn Store>>,
    Json(req): Json<CreateHolidayRequest>,
) -> Result<Json<Holiday>> {
    use validator::Validate;
    req.validate()?;

    // Recurring entries are checked against a leap year so 29.02 is allowed.
    let month = Month::try_from(req.month)
        .map_err(|_| AppError::BadRequest("Invalid month".into()))?;
    if req.day > month.length(req.year.unwrap_or(2024)) {
        return Err(AppError::BadRequest(format!(
            "{month} has no day {}",
            req.day
        )));
    }

    let holiday = match req.year {
        Some(year) => Holiday::one_off(req.day, req.month, year, req.name),
        None => Holiday::recurring(req.day, req.month, req.name),
    };
    store.add_holiday(&holiday).await?;

    Ok(Json(holiday))
}

pub async fn remove(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !store.remove_holiday(id).await? {
        return Err(AppError::NotFound("Holiday not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
