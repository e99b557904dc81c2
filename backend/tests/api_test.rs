mod common;

use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use timesheet_backend::{models::schedule::ScheduleDay, store::Store};

/// 2025-01-06 (Monday) 09:00 UTC.
const MONDAY_NINE: i64 = 1_735_722_000 + 5 * 86_400;

#[tokio::test]
async fn generate_persists_and_load_returns_stored_days() {
    let (addr, store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;

    let client = common::http_client();
    let resp = client
        .post(format!("http://{}/api/employees/{}/schedule", addr, employee_id))
        .json(&json!({ "year": 2025, "month": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["summary"]["work_days"], 23);
    assert_eq!(body["days"].as_array().unwrap().len(), 31);

    let stored = store.load_schedule(employee_id, 2025, 1).await.unwrap().unwrap();
    assert_eq!(stored.iter().filter(|d| d.is_work_day).count(), 23);

    let resp = client
        .get(format!(
            "http://{}/api/employees/{}/schedule?year=2025&month=1",
            addr, employee_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let loaded: Vec<ScheduleDay> = resp.json().await.unwrap();
    assert_eq!(loaded, stored);
}

#[tokio::test]
async fn load_does_not_regenerate_after_policy_change() {
    let (addr, _store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;
    let client = common::http_client();

    client
        .post(format!("http://{}/api/employees/{}/schedule", addr, employee_id))
        .json(&json!({ "year": 2025, "month": 1 }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("http://{}/api/employees/{}", addr, employee_id))
        .json(&json!({ "schedule": common::rotating_schedule("2/2", "08:00", "20:00", 12.0) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let loaded: Vec<ScheduleDay> = client
        .get(format!(
            "http://{}/api/employees/{}/schedule?year=2025&month=1",
            addr, employee_id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loaded.iter().filter(|d| d.is_work_day).count(), 23);
}

#[tokio::test]
async fn rejected_submission_is_not_persisted() {
    let (addr, store) = common::setup_test_app_with(Arc::new(common::RejectingSubmitter)).await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;

    let client = common::http_client();
    let resp = client
        .post(format!("http://{}/api/employees/{}/schedule", addr, employee_id))
        .json(&json!({ "year": 2025, "month": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("503"));

    assert!(store.load_schedule(employee_id, 2025, 1).await.unwrap().is_none());

    let resp = client
        .get(format!(
            "http://{}/api/employees/{}/schedule?year=2025&month=1",
            addr, employee_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn invalid_schedule_config_is_unprocessable() {
    let (addr, store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;

    let mut broken = common::office_schedule();
    broken.is_complex = true;

    let resp = common::http_client()
        .post(format!("http://{}/api/employees", addr))
        .json(&json!({
            "name": "Broken Policy",
            "company_id": company_id,
            "schedule": broken,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let resp = common::http_client()
        .post(format!("http://{}/api/employees", addr))
        .json(&json!({
            "name": "Bad Clock",
            "company_id": company_id,
            "schedule": common::rotating_schedule("2/2", "8am", "20:00", 12.0),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let all = store.list_employees(&Default::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn bulk_generation_reports_each_employee() {
    let (addr, store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let good = common::create_employee(addr, company_id, &common::office_schedule()).await;

    // Stored directly so the API's policy check is bypassed.
    let mut broken =
        common::employee_with(common::rotating_schedule("2/2", "08:00", "20:00", 12.0));
    broken.schedule.shift_duration_hours = None;
    store.upsert_employee(&broken).await.unwrap();

    let mut inactive = common::employee_with(common::office_schedule());
    inactive.is_active = false;
    store.upsert_employee(&inactive).await.unwrap();

    let resp = common::http_client()
        .post(format!("http://{}/api/schedule/generate", addr))
        .json(&json!({ "year": 2025, "month": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let outcomes: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        let id: Uuid = outcome["employee_id"].as_str().unwrap().parse().unwrap();
        if id == good {
            assert_eq!(outcome["committed"], true);
            assert_eq!(outcome["summary"]["work_days"], 20);
        } else {
            assert_eq!(id, broken.id);
            assert_eq!(outcome["committed"], false);
            assert!(outcome["error"].as_str().unwrap().contains("shift_duration_hours"));
        }
    }

    assert!(store.load_schedule(good, 2025, 2).await.unwrap().is_some());
    assert!(store.load_schedule(broken.id, 2025, 2).await.unwrap().is_none());
    assert!(store.load_schedule(inactive.id, 2025, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn check_in_then_check_out() {
    let (addr, _store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;
    let client = common::http_client();

    let resp = client
        .post(format!("http://{}/api/checkins", addr))
        .json(&json!({
            "employee_id": employee_id,
            "instant": MONDAY_NINE + 5 * 60,
            "match_confidence": 98.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["verdict"]["status"], "late");
    assert_eq!(body["verdict"]["late_minutes"], 5);
    assert_eq!(body["verdict"]["valid"], true);
    assert_eq!(body["attendance"]["status"], "late");
    assert_eq!(body["attendance"]["check_in"], "09:05");

    let resp = client
        .post(format!("http://{}/api/checkins", addr))
        .json(&json!({
            "employee_id": employee_id,
            "instant": MONDAY_NINE + 9 * 3600,
            "match_confidence": 98.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["attendance"]["check_out"], "18:00");
    assert!(body.get("verdict").is_none());

    let records: Vec<Value> = client
        .get(format!(
            "http://{}/api/employees/{}/attendance?year=2025&month=1",
            addr, employee_id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date"], "2025-01-06");
}

#[tokio::test]
async fn overnight_check_out_closes_previous_day() {
    let (addr, store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(
        addr,
        company_id,
        &common::rotating_schedule("1/3", "20:00", "08:00", 12.0),
    )
    .await;
    let client = common::http_client();

    // 2024-01-01 is a work day of the default-anchored 1/3 rotation.
    let start = 1_704_067_200 + 20 * 3600;
    for instant in [start - 15 * 60, start + 12 * 3600] {
        let resp = client
            .post(format!("http://{}/api/checkins", addr))
            .json(&json!({
                "employee_id": employee_id,
                "instant": instant,
                "match_confidence": 90.0,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let records = store.list_attendance(employee_id, 2024, 1).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date.to_string(), "2024-01-01");
    assert_eq!(records[0].duration_hours, Some(12.25));
}

#[tokio::test]
async fn check_in_rejects_bad_confidence() {
    let (addr, _store) = common::setup_test_app().await;
    let resp = common::http_client()
        .post(format!("http://{}/api/checkins", addr))
        .json(&json!({
            "employee_id": Uuid::new_v4(),
            "instant": MONDAY_NINE,
            "match_confidence": 120.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn holiday_crud_and_year_projection() {
    let (addr, _store) = common::setup_test_app().await;
    let client = common::http_client();

    let resp = client
        .post(format!("http://{}/api/holidays", addr))
        .json(&json!({ "day": 16, "month": 12, "name": "Independence Day" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert!(created["year"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    let resp = client
        .post(format!("http://{}/api/holidays", addr))
        .json(&json!({ "day": 31, "month": 4, "name": "Nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let dated: Vec<Value> = client
        .get(format!("http://{}/api/holidays?year=2025", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dated.len(), 1);
    assert_eq!(dated[0]["date"], "2025-12-16");

    let resp = client
        .delete(format!("http://{}/api/holidays/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .delete(format!("http://{}/api/holidays/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn holidays_shape_generated_month() {
    let (addr, _store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;
    let client = common::http_client();

    client
        .post(format!("http://{}/api/holidays", addr))
        .json(&json!({ "day": 1, "month": 1, "name": "New Year" }))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .post(format!("http://{}/api/employees/{}/schedule", addr, employee_id))
        .json(&json!({ "year": 2025, "month": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["summary"]["work_days"], 22);
    assert_eq!(body["summary"]["holidays"], 1);
    assert_eq!(body["days"][0]["is_holiday"], true);
    assert_eq!(body["days"][0]["is_work_day"], false);
}

#[tokio::test]
async fn synthesize_then_stats() {
    let (addr, _store) = common::setup_test_app().await;
    let company_id = common::create_company(addr).await;
    let employee_id = common::create_employee(addr, company_id, &common::office_schedule()).await;
    let client = common::http_client();

    let resp = client
        .post(format!("http://{}/api/attendance/synthesize", addr))
        .json(&json!({ "year": 2024, "month": 3, "seed": 11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let summary: Value = resp.json().await.unwrap();
    assert_eq!(summary["employees"], 1);
    assert_eq!(summary["created"], 31);

    // A second run adds nothing.
    let summary: Value = client
        .post(format!("http://{}/api/attendance/synthesize", addr))
        .json(&json!({ "year": 2024, "month": 3, "seed": 12 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["created"], 0);

    let resp = client
        .get(format!(
            "http://{}/api/employees/{}/stats?year=2024&month=3",
            addr, employee_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let stats: Value = resp.json().await.unwrap();
    assert!(stats["total_hours"].as_f64().unwrap() > 0.0);
    assert!(stats["late_count"].as_u64().is_some());
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let (addr, _store) = common::setup_test_app().await;
    let resp = common::http_client()
        .post(format!(
            "http://{}/api/employees/{}/schedule",
            addr,
            Uuid::new_v4()
        ))
        .json(&json!({ "year": 2025, "month": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
