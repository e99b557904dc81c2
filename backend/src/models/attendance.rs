use serde::{Deserialize, Serialize};
use time::{Date, Time};
use uuid::Uuid;
use validator::Validate;

use crate::schedule::ArrivalVerdict;

time::serde::format_description!(clock_hhmm, Time, "[hour]:[minute]");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    DayOff,
    Vacation,
    SickLeave,
}

/// One observed (or synthesized) day of attendance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attendance {
    pub employee_id: Uuid,
    pub date: Date,
    #[serde(default, with = "clock_hhmm::option")]
    pub check_in: Option<Time>,
    #[serde(default, with = "clock_hhmm::option")]
    pub check_out: Option<Time>,
    pub status: AttendanceStatus,
    pub late_minutes: Option<i64>,
    pub duration_hours: Option<f64>,
    pub unix_check_in: Option<i64>,
    pub unix_check_out: Option<i64>,
}

impl Attendance {
    /// A record with no clock times, e.g. a day off or an absence.
    pub fn without_times(employee_id: Uuid, date: Date, status: AttendanceStatus) -> Self {
        Self {
            employee_id,
            date,
            check_in: None,
            check_out: None,
            status,
            late_minutes: None,
            duration_hours: None,
            unix_check_in: None,
            unix_check_out: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

/// A check-in reported by the biometric event source.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckInEvent {
    pub employee_id: Uuid,
    /// Epoch seconds.
    pub instant: i64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub match_confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub attendance: Attendance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ArrivalVerdict>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttendanceStats {
    pub total_hours: f64,
    pub late_count: u32,
    pub absent_count: u32,
    pub overtime_hours: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SynthesizeRequest {
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u8,
    pub seed: Option<u64>,
}

/// Result of a synthesis run over all active employees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisSummary {
    pub employees: usize,
    pub created: usize,
    /// Employees whose schedule policy could not be evaluated.
    pub skipped: Vec<Uuid>,
}
