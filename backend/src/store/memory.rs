use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;
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

use super::Store;

#[derive(Default)]
struct Tables {
    employees: HashMap<Uuid, Employee>,
    companies: HashMap<Uuid, Company>,
    holidays: Vec<Holiday>,
    schedules: HashMap<(Uuid, i32, u8), Vec<ScheduleDay>>,
    attendance: BTreeMap<(Uuid, Date), Attendance>,
}

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let tables = self.tables.read().await;
        let mut employees: Vec<Employee> = tables
            .employees
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self.tables.read().await.employees.get(&id).cloned())
    }

    async fn upsert_employee(&self, employee: &Employee) -> Result<()> {
        self.tables
            .write()
            .await
            .employees
            .insert(employee.id, employee.clone());
        Ok(())
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.employees.remove(&id).is_some())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let mut companies: Vec<Company> =
            self.tables.read().await.companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn upsert_company(&self, company: &Company) -> Result<()> {
        self.tables
            .write()
            .await
            .companies
            .insert(company.id, company.clone());
        Ok(())
    }

    async fn list_holidays(&self) -> Result<Vec<Holiday>> {
        Ok(self.tables.read().await.holidays.clone())
    }

    async fn add_holiday(&self, holiday: &Holiday) -> Result<()> {
        self.tables.write().await.holidays.push(holiday.clone());
        Ok(())
    }

    async fn remove_holiday(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.holidays.len();
        tables.holidays.retain(|h| h.id != id);
        Ok(tables.holidays.len() != before)
    }

    async fn save_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        days: &[ScheduleDay],
    ) -> Result<()> {
        self.tables
            .write()
            .await
            .schedules
            .insert((employee_id, year, month), days.to_vec());
        Ok(())
    }

    async fn load_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Option<Vec<ScheduleDay>>> {
        Ok(self
            .tables
            .read()
            .await
            .schedules
            .get(&(employee_id, year, month))
            .cloned())
    }

    async fn list_attendance(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Vec<Attendance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .iter()
            .filter(|((id, date), _)| {
                *id == employee_id && date.year() == year && u8::from(date.month()) == month
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get_attendance(&self, employee_id: Uuid, date: Date) -> Result<Option<Attendance>> {
        Ok(self
            .tables
            .read()
            .await
            .attendance
            .get(&(employee_id, date))
            .cloned())
    }

    async fn upsert_attendance(&self, record: &Attendance) -> Result<()> {
        self.tables
            .write()
            .await
            .attendance
            .insert((record.employee_id, record.date), record.clone());
        Ok(())
    }
}
