use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

/// Work pattern discriminant as supplied by the employee store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    #[serde(alias = "5/2")]
    FixedWeekly,
    #[serde(alias = "2/2")]
    TwoOnTwoOff,
    #[serde(alias = "1/3")]
    OneOnThreeOff,
    Flexible,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    #[default]
    #[serde(alias = "D")]
    SameDay,
    #[serde(alias = "D+")]
    Overnight,
}

/// Per-employee schedule policy in its stored (flat) form.
///
/// Times are local clock strings; they are parsed and cross-checked when the
/// config is turned into a [`crate::schedule::WorkSchedule`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkScheduleConfig {
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[serde(default)]
    pub mode: ScheduleMode,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub work_days: Vec<u8>,
    pub shift_duration_hours: Option<f64>,
    pub early_arrival_tolerance_minutes: Option<u32>,
    pub late_arrival_tolerance_minutes: Option<u32>,
    /// Reference date for rotating and anchored complex cycles.
    pub anchor_date: Option<Date>,
    #[serde(default)]
    pub is_complex: bool,
    pub complex_schedule: Option<ComplexScheduleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplexScheduleConfig {
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    /// `[early, late]` arrival tolerance, overriding the top-level values.
    pub arrival_tolerance_minutes: Option<[u32; 2]>,
    pub blocks: Vec<ScheduleBlockConfig>,
}

/// Rostered work days followed by consecutive days off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleBlockConfig {
    pub work_days: Vec<WorkDayConfig>,
    #[serde(default)]
    pub off_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkDayConfig {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub overnight: bool,
    pub work_hours: f64,
    #[serde(default)]
    pub breaks: Vec<BreakConfig>,
    /// Breaks falling on the calendar day after the shift date.
    #[serde(default)]
    pub overnight_breaks: Vec<BreakConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakConfig {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// A break period with absolute instants (epoch seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Break {
    pub name: String,
    pub start: i64,
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_end: Option<i64>,
}

impl Break {
    pub fn planned(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            fact_start: None,
            fact_end: None,
        }
    }
}

/// Fields filled in after the day is worked, by reconciliation outside the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    pub fact_hours: f64,
    pub is_late_arrival: bool,
    pub is_early_departure: bool,
    pub late_arrival_minutes: u32,
    pub early_arrival_minutes: u32,
    pub early_departure_minutes: u32,
}

/// One generated calendar day for one employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDay {
    pub employee_id: Uuid,
    pub company_id: Uuid,
    pub date: Date,
    pub year: i32,
    pub month: String,
    pub day_of_week: String,
    pub is_work_day: bool,
    pub is_holiday: bool,
    pub overnight: bool,
    pub unix_start: i64,
    pub unix_end: i64,
    pub plan_hours: f64,
    pub day_breaks: Vec<Break>,
    pub overnight_breaks: Vec<Break>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<Reconciliation>,
}

impl ScheduleDay {
    /// A zeroed non-working record (day off or holiday).
    pub fn off(employee_id: Uuid, company_id: Uuid, date: Date, is_holiday: bool) -> Self {
        Self {
            employee_id,
            company_id,
            date,
            year: date.year(),
            month: date.month().to_string(),
            day_of_week: date.weekday().to_string(),
            is_work_day: false,
            is_holiday,
            overnight: false,
            unix_start: 0,
            unix_end: 0,
            plan_hours: 0.0,
            day_breaks: Vec::new(),
            overnight_breaks: Vec::new(),
            reconciliation: None,
        }
    }

    pub fn shift_seconds(&self) -> i64 {
        self.unix_end - self.unix_start
    }
}

/// Totals reported back after a month is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthSummary {
    pub work_days: u32,
    pub holidays: u32,
    pub planned_hours: f64,
    pub scheduled_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSchedule {
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u8,
    pub summary: MonthSummary,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateScheduleRequest {
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u8,
}

/// Outcome of one employee in a bulk generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub employee_id: Uuid,
    pub committed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MonthSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
