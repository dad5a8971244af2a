//! Employee row model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
use sqlx::FromRow;

/// An employee row as stored in SQLite
///
/// `salary` lives in a REAL column and is converted back to a decimal
/// on read; `status` is stored as its wire string.
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: String,
    pub position: String,
    #[sqlx(try_from = "f64")]
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: EmployeeStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        let full_name = format!("{} {}", e.first_name, e.last_name);
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone_number: e.phone_number,
            department: e.department,
            position: e.position,
            salary: e.salary,
            hire_date: e.hire_date,
            status: e.status,
            address: e.address,
            city: e.city,
            state: e.state,
            zip_code: e.zip_code,
            emergency_contact_name: e.emergency_contact_name,
            emergency_contact_phone: e.emergency_contact_phone,
            full_name,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Validated employee fields ready to be written
///
/// Built by the service layer from an [`EmployeeRequest`] after
/// validation; `salary` and `hire_date` are therefore present and the
/// status has been resolved.
#[derive(Debug, Clone)]
pub struct EmployeeData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: String,
    pub position: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

impl EmployeeData {
    /// Build from a validated request, resolving the status
    ///
    /// Callers decide the fallback: ACTIVE on create, the stored status
    /// on update.
    pub fn from_request(req: EmployeeRequest, status: EmployeeStatus) -> Option<Self> {
        Some(Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            department: req.department,
            position: req.position,
            salary: req.salary?,
            hire_date: req.hire_date?,
            status,
            address: req.address,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            emergency_contact_name: req.emergency_contact_name,
            emergency_contact_phone: req.emergency_contact_phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row() -> Employee {
        Employee {
            id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone_number: None,
            department: "Engineering".into(),
            position: "Analyst".into(),
            salary: Decimal::from_str("90000.00").unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
            status: EmployeeStatus::Active,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_computes_full_name() {
        let resp: EmployeeResponse = row().into();
        assert_eq!(resp.full_name, "Ada Lovelace");
        assert_eq!(resp.id, 7);
    }

    #[test]
    fn test_from_request_requires_salary_and_hire_date() {
        let req = EmployeeRequest::default();
        assert!(EmployeeData::from_request(req, EmployeeStatus::Active).is_none());
    }
}
