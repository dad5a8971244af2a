//! Employee repository
//!
//! All SQL touching the employees table lives here. Paged queries take
//! a [`PageRequest`] whose order column is already whitelisted, so the
//! ORDER BY clause can be interpolated directly.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::SqlitePool;

use shared::models::EmployeeStatus;

use super::{PageRequest, RepoResult};
use crate::db::DbService;
use crate::db::models::{Employee, EmployeeData};

const COLUMNS: &str = "id, first_name, last_name, email, phone_number, department, position, \
     salary, hire_date, status, address, city, state, zip_code, \
     emergency_contact_name, emergency_contact_phone, created_at, updated_at";

/// Employee repository
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(db: DbService) -> Self {
        Self { pool: db.pool }
    }

    // ==================== Reads ====================

    /// One page of employees plus the total row count
    pub async fn find_page(&self, page: &PageRequest) -> RepoResult<(Vec<Employee>, i64)> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees {} LIMIT ? OFFSET ?",
            page.order_clause()
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE id = ?");
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE email = ?");
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Email taken by a different employee (update pre-check)
    pub async fn exists_by_email_excluding(&self, email: &str, id: i64) -> RepoResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE email = ? AND id != ?")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    // ==================== Filters ====================

    pub async fn find_by_status(&self, status: EmployeeStatus) -> RepoResult<Vec<Employee>> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE status = ? ORDER BY id");
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_department(
        &self,
        department: &str,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Employee>, i64)> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE department = ? {} LIMIT ? OFFSET ?",
            page.order_clause()
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(department)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department = ?")
                .bind(department)
                .fetch_one(&self.pool)
                .await?;

        Ok((rows, total))
    }

    pub async fn find_by_position(
        &self,
        position: &str,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Employee>, i64)> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE position = ? {} LIMIT ? OFFSET ?",
            page.order_clause()
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(position)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE position = ?")
            .bind(position)
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn find_by_department_and_status(
        &self,
        department: &str,
        status: EmployeeStatus,
    ) -> RepoResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE department = ? AND status = ? ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(department)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Hired in the inclusive date range
    pub async fn find_hired_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE hire_date BETWEEN ? AND ? ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Hired on or after the cutoff date
    pub async fn find_hired_since(&self, cutoff: NaiveDate) -> RepoResult<Vec<Employee>> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE hire_date >= ? ORDER BY id");
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_salary_greater_than(&self, min: Decimal) -> RepoResult<Vec<Employee>> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE salary > ? ORDER BY id");
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(min.to_f64().unwrap_or_default())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Salary in the inclusive range
    pub async fn find_salary_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> RepoResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE salary BETWEEN ? AND ? ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(min.to_f64().unwrap_or_default())
            .bind(max.to_f64().unwrap_or_default())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Case-insensitive substring search over name, email, department
    /// and position
    pub async fn search(
        &self,
        term: &str,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Employee>, i64)> {
        let pattern = format!("%{}%", term.to_lowercase());
        let filter = "LOWER(first_name) LIKE ?1 OR LOWER(last_name) LIKE ?1 \
             OR LOWER(email) LIKE ?1 OR LOWER(department) LIKE ?1 OR LOWER(position) LIKE ?1";

        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE {filter} {} LIMIT ?2 OFFSET ?3",
            page.order_clause()
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM employees WHERE {filter}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    // ==================== Aggregates ====================

    pub async fn count_by_department(&self) -> RepoResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT department, COUNT(*) FROM employees GROUP BY department",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_status(&self) -> RepoResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM employees GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    // ==================== Writes ====================

    pub async fn insert(&self, data: EmployeeData) -> RepoResult<Employee> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO employees (first_name, last_name, email, phone_number, department, \
             position, salary, hire_date, status, address, city, state, zip_code, \
             emergency_contact_name, emergency_contact_phone, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone_number)
            .bind(&data.department)
            .bind(&data.position)
            .bind(data.salary.to_f64().unwrap_or_default())
            .bind(data.hire_date)
            .bind(data.status.as_str())
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zip_code)
            .bind(&data.emergency_contact_name)
            .bind(&data.emergency_contact_phone)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace all mutable fields; `id` and `created_at` never change
    pub async fn update(&self, id: i64, data: EmployeeData) -> RepoResult<Option<Employee>> {
        let sql = format!(
            "UPDATE employees SET first_name = ?, last_name = ?, email = ?, phone_number = ?, \
             department = ?, position = ?, salary = ?, hire_date = ?, status = ?, address = ?, \
             city = ?, state = ?, zip_code = ?, emergency_contact_name = ?, \
             emergency_contact_phone = ?, updated_at = ? WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone_number)
            .bind(&data.department)
            .bind(&data.position)
            .bind(data.salary.to_f64().unwrap_or_default())
            .bind(data.hire_date)
            .bind(data.status.as_str())
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zip_code)
            .bind(&data.emergency_contact_name)
            .bind(&data.emergency_contact_phone)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
