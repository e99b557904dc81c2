use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
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

use super::Store;

/// Postgres-backed store. Nested documents (employee schedule policy,
/// generated days, attendance records) are kept as JSONB.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type HolidayRow = (Uuid, i16, i16, Option<i32>, String);

fn holiday_from_row((id, day, month, year, name): HolidayRow) -> Holiday {
    Holiday {
        id,
        day: day as u8,
        month: month as u8,
        year,
        name,
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let rows: Vec<(Json<Employee>,)> = sqlx::query_as(
            r#"
            SELECT data FROM employees
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND ($2::text IS NULL OR department = $2)
              AND ($3::bool IS NULL OR is_active = $3)
            ORDER BY name
            "#,
        )
        .bind(filter.company_id)
        .bind(filter.department.as_deref())
        .bind(filter.is_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(Json(e),)| e).collect())
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
        let row: Option<(Json<Employee>,)> =
            sqlx::query_as("SELECT data FROM employees WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(e),)| e))
    }

    async fn upsert_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, company_id, name, department, is_active, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET company_id = EXCLUDED.company_id,
                name       = EXCLUDED.name,
                department = EXCLUDED.department,
                is_active  = EXCLUDED.is_active,
                data       = EXCLUDED.data
            "#,
        )
        .bind(employee.id)
        .bind(employee.company_id)
        .bind(&employee.name)
        .bind(&employee.department)
        .bind(employee.is_active)
        .bind(Json(employee))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let rows: Vec<(Uuid, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, tax_id FROM companies ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, tax_id)| Company { id, name, tax_id })
            .collect())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>> {
        let row: Option<(Uuid, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, tax_id FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, name, tax_id)| Company { id, name, tax_id }))
    }

    async fn upsert_company(&self, company: &Company) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, tax_id) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, tax_id = EXCLUDED.tax_id
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(company.tax_id.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let rows: Vec<HolidayRow> = sqlx::query_as(
            "SELECT id, day, month, year, name FROM holidays ORDER BY month, day",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(holiday_from_row).collect())
    }

    async fn add_holiday(&self, holiday: &Holiday) -> Result<()> {
        sqlx::query("INSERT INTO holidays (id, day, month, year, name) VALUES ($1, $2, $3, $4, $5)")
            .bind(holiday.id)
            .bind(i16::from(holiday.day))
            .bind(i16::from(holiday.month))
            .bind(holiday.year)
            .bind(&holiday.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_holiday(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        days: &[ScheduleDay],
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (employee_id, year, month, days)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (employee_id, year, month) DO UPDATE
            SET days = EXCLUDED.days, generated_at = now()
            "#,
        )
        .bind(employee_id)
        .bind(year)
        .bind(i16::from(month))
        .bind(Json(days))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load_schedule(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Option<Vec<ScheduleDay>>> {
        let row: Option<(Json<Vec<ScheduleDay>>,)> = sqlx::query_as(
            "SELECT days FROM schedules WHERE employee_id = $1 AND year = $2 AND month = $3",
        )
        .bind(employee_id)
        .bind(year)
        .bind(i16::from(month))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(days),)| days))
    }

    async fn list_attendance(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<Vec<Attendance>> {
        let rows: Vec<(Json<Attendance>,)> = sqlx::query_as(
            r#"
            SELECT data FROM attendance
            WHERE employee_id = $1
              AND EXTRACT(YEAR FROM date)::int = $2
              AND EXTRACT(MONTH FROM date)::int = $3
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(year)
        .bind(i32::from(month))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(Json(a),)| a).collect())
    }

    async fn get_attendance(&self, employee_id: Uuid, date: Date) -> Result<Option<Attendance>> {
        let row: Option<(Json<Attendance>,)> =
            sqlx::query_as("SELECT data FROM attendance WHERE employee_id = $1 AND date = $2")
                .bind(employee_id)
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(a),)| a))
    }

    async fn upsert_attendance(&self, record: &Attendance) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (employee_id, date) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(record.employee_id)
        .bind(record.date)
        .bind(Json(record))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
