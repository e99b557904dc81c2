#![allow(dead_code)]
use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use timesheet_backend::{
    api,
    error::ScheduleError,
    models::{
        employee::Employee,
        schedule::{ScheduleDay, WorkScheduleConfig},
    },
    schedule::ScheduleSettings,
    store::MemoryStore,
    submission::{LoggingSubmitter, ScheduleSubmitter},
    AppState,
};

/// Refuses every month, as a remote endpoint answering with an error would.
pub struct RejectingSubmitter;

#[async_trait]
impl ScheduleSubmitter for RejectingSubmitter {
    async fn submit(&self, _employee_id: Uuid, _days: &[ScheduleDay]) -> Result<(), ScheduleError> {
        Err(ScheduleError::SubmissionRejected("503 Service Unavailable".into()))
    }
}

/// Spin up a real Axum server on a random port backed by a fresh in-memory
/// store, returning its address and the store.
pub async fn setup_test_app() -> (SocketAddr, Arc<MemoryStore>) {
    setup_test_app_with(Arc::new(LoggingSubmitter)).await
}

pub async fn setup_test_app_with(
    submitter: Arc<dyn ScheduleSubmitter>,
) -> (SocketAddr, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone(),
        submitter,
        settings: ScheduleSettings::default(),
    };

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, store)
}

/// Build a reqwest client (reusable across requests in a test).
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn config(value: serde_json::Value) -> WorkScheduleConfig {
    serde_json::from_value(value).expect("Invalid schedule config fixture")
}

/// Monday to Friday, 09:00 to 18:00.
pub fn office_schedule() -> WorkScheduleConfig {
    config(json!({
        "type": "5/2",
        "start_time": "09:00",
        "end_time": "18:00",
        "work_days": [1, 2, 3, 4, 5],
    }))
}

pub fn rotating_schedule(kind: &str, start: &str, end: &str, hours: f64) -> WorkScheduleConfig {
    config(json!({
        "type": kind,
        "start_time": start,
        "end_time": end,
        "shift_duration_hours": hours,
    }))
}

/// Three blocks: five day shifts, five late shifts and three 24h shifts,
/// each followed by days off. The cycle is 20 days long.
pub fn complex_schedule() -> WorkScheduleConfig {
    let day = |start: &str, end: &str| {
        json!({ "start_time": start, "end_time": end, "work_hours": 8.0 })
    };
    let long_day = json!({
        "start_time": "16:00",
        "end_time": "16:00",
        "overnight": true,
        "work_hours": 22.0,
        "breaks": [
            { "name": "dinner", "start": "19:00", "end": "19:30" },
            { "name": "tea", "start": "21:00", "end": "21:15" },
        ],
        "overnight_breaks": [
            { "name": "night", "start": "02:00", "end": "02:30" },
            { "name": "lunch", "start": "11:00", "end": "11:30" },
        ],
    });

    config(json!({
        "type": "flexible",
        "start_time": "09:00",
        "end_time": "18:00",
        "is_complex": true,
        "complex_schedule": {
            "id": 7,
            "name": "Plant rota",
            "blocks": [
                { "work_days": vec![day("09:00", "18:00"); 5], "off_days": 2 },
                { "work_days": vec![day("11:00", "20:00"); 5], "off_days": 2 },
                { "work_days": vec![long_day; 3], "off_days": 3 },
            ],
        },
    }))
}

pub fn employee_with(schedule: WorkScheduleConfig) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: "Aigerim Sadykova".into(),
        position: "Operator".into(),
        department: "Production".into(),
        company_id: Uuid::new_v4(),
        location: None,
        face_id: None,
        schedule,
        is_active: true,
    }
}

/// Create a company through the API. Returns its ID.
pub async fn create_company(addr: SocketAddr) -> Uuid {
    let resp = http_client()
        .post(format!("http://{}/api/companies", addr))
        .json(&json!({ "name": "Test Company" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "Company creation should return 200");

    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Create an employee through the API. Returns its ID.
pub async fn create_employee(
    addr: SocketAddr,
    company_id: Uuid,
    schedule: &WorkScheduleConfig,
) -> Uuid {
    let resp = http_client()
        .post(format!("http://{}/api/employees", addr))
        .json(&json!({
            "name": "Test Employee",
            "company_id": company_id,
            "schedule": schedule,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "Employee creation should return 200");

    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_str().unwrap().parse().unwrap()
}
