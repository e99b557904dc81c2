use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::schedule::WorkScheduleConfig;

/// Employee record as held by the employee store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub department: String,
    pub company_id: Uuid,
    pub location: Option<String>,
    pub face_id: Option<String>,
    pub schedule: WorkScheduleConfig,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub tax_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    pub company_id: Uuid,
    pub location: Option<String>,
    pub face_id: Option<String>,
    pub schedule: WorkScheduleConfig,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub schedule: Option<WorkScheduleConfig>,
    pub is_active: Option<bool>,
}

/// List filter; every field is optional and fields combine with AND.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeFilter {
    pub company_id: Option<Uuid>,
    pub department: Option<String>,
    pub is_active: Option<bool>,
}

impl EmployeeFilter {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.company_id.map_or(true, |id| employee.company_id == id)
            && self
                .department
                .as_deref()
                .map_or(true, |d| employee.department == d)
            && self.is_active.map_or(true, |a| employee.is_active == a)
    }
}
