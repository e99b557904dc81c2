use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::employee::{CreateEmployeeRequest, Employee, EmployeeFilter, UpdateEmployeeRequest},
    schedule::WorkSchedule,
    store::Store,
};

pub async fn list(
    State(store): State<Arc<dyn Store>>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(store.list_employees(&filter).await?))
}

pub async fn get_one(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>> {
    Ok(Json(fetch(store.as_ref(), id).await?))
}

/// Loads an employee or fails with 404.
pub(crate) async fn fetch(store: &dyn Store, id: Uuid) -> Result<Employee> {
    store
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".into()))
}

pub async fn create(
    State(store): State<Arc<dyn Store>>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>> {
    use validator::Validate;
    req.validate()?;

    // Reject policies the engine cannot evaluate before they are stored.
    WorkSchedule::try_from(&req.schedule)?;

    if store.get_company(req.company_id).await?.is_none() {
        return Err(AppError::BadRequest("Unknown company_id".into()));
    }

    let employee = Employee {
        id: Uuid::new_v4(),
        name: req.name,
        position: req.position,
        department: req.department,
        company_id: req.company_id,
        location: req.location,
        face_id: req.face_id,
        schedule: req.schedule,
        is_active: req.is_active.unwrap_or(true),
    };
    store.upsert_employee(&employee).await?;

    tracing::info!(employee_id = %employee.id, "Employee created");
    Ok(Json(employee))
}

pub async fn update(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>> {
    use validator::Validate;
    req.validate()?;

    if let Some(schedule) = &req.schedule {
        WorkSchedule::try_from(schedule)?;
    }

    let current = fetch(store.as_ref(), id).await?;
    let employee = Employee {
        name: req.name.unwrap_or(current.name),
        position: req.position.unwrap_or(current.position),
        department: req.department.unwrap_or(current.department),
        location: req.location.or(current.location),
        schedule: req.schedule.unwrap_or(current.schedule),
        is_active: req.is_active.unwrap_or(current.is_active),
        ..current
    };
    store.upsert_employee(&employee).await?;

    Ok(Json(employee))
}

pub async fn remove(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !store.delete_employee(id).await? {
        return Err(AppError::NotFound("Employee not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
