pub mod attendance;
pub mod companies;
pub mod employees;
pub mod holidays;
pub mod schedule;

use axum::{Router, routing::{get, post, delete}};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Companies
        .route("/api/companies", get(companies::list).post(companies::create))
        // Employees
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get_one).put(employees::update).delete(employees::remove),
        )
        // Holidays
        .route("/api/holidays", get(holidays::list).post(holidays::create))
        .route("/api/holidays/:id", delete(holidays::remove))
        // Schedules
        .route("/api/employees/:id/schedule", get(schedule::load).post(schedule::generate_one))
        .route("/api/schedule/generate", post(schedule::generate_all))
        // Attendance
        .route("/api/checkins", post(attendance::check_in))
        .route("/api/employees/:id/attendance", get(attendance::list))
        .route("/api/employees/:id/stats", get(attendance::stats))
        .route("/api/attendance/synthesize", post(attendance::synthesize))
        .with_state(state)
}
