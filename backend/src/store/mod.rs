//! Persistence boundary.
//!
//! The schedule engine never touches storage; handlers load inputs through a
//! [`Store`], run the engine and write the results back.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        attendance::Attendance,
        employee::{Company, Employee, EmployeeFilter},
        holiday::Holiday,
        schedule::ScheduleDay,
    },
};

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>>;
    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>>;
    async fn upsert_employee(&self, employee: &Employee) -> Result<()>;
    /// Returns whether a record was removed.
    async fn delete_employee(&self, id: Uuid) -> Result<bool>;

    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn get_company(&self, id: Uuid) -> Result<Option<Company>>;
    async fn upsert_company(&self, company: &Company) -> Result<()>;

    async fn list_holidays(&self) -> Result<Vec<Holiday>>;
    async fn add_holiday(&self, holiday: &Holiday) -> Result<()>;
    async fn remove_holiday(&self, id: Uuid) -> Result<bool>;

    /// Replaces whatever was stored for the same employee and month.
    async fn save_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        days: &[ScheduleDay],
    ) -> Result<()>;
    async fn load_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Option<Vec<ScheduleDay>>>;

    async fn list_attendance(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Vec<Attendance>>;
    async fn get_attendance(&self, employee_id: Uuid, date: Date) -> Result<Option<Attendance>>;
    async fn upsert_attendance(&self, record: &Attendance) -> Result<()>;
}

/// Stored schedule day for `date`, if that month has been generated.
pub async fn stored_day(
    store: &dyn Store,
    employee_id: Uuid,
    date: Date,
) -> Result<Option<ScheduleDay>> {
    let days = store
        .load_schedule(employee_id, date.year(), u8::from(date.month()))
        .await?;
    Ok(days.and_then(|days| days.into_iter().find(|d| d.date == date)))
}
