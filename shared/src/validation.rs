//! Employee request validation
//!
//! One set of rules shared by the server (authoritative) and the client
//! (pre-flight mirror, so malformed submissions fail before a network
//! round-trip). All violations are collected into a single
//! [`AppError`] whose details map lists every offending field.

use crate::error::{AppError, ErrorCode};
use crate::models::EmployeeRequest;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use validator::ValidateEmail;

// ── Field limits ────────────────────────────────────────────────────

/// First / last name bounds
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Salary: at most 10 integer digits and 2 fraction digits
pub const MAX_SALARY_INTEGER_DIGITS: u32 = 10;
pub const MAX_SALARY_FRACTION_DIGITS: u32 = 2;

// E.164-like phone pattern
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("valid phone regex"));

// US zip: 5 digits or 5+4
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip regex"));

/// Validate an employee payload against today's date
pub fn validate_employee_request(req: &EmployeeRequest) -> Result<(), AppError> {
    validate_employee_request_at(req, Utc::now().date_naive())
}

/// Validate an employee payload against an explicit "today"
///
/// Separated from the clock so the hire-date rule is testable.
pub fn validate_employee_request_at(
    req: &EmployeeRequest,
    today: NaiveDate,
) -> Result<(), AppError> {
    let mut violations: HashMap<String, Value> = HashMap::new();

    check_name(&mut violations, "firstName", &req.first_name);
    check_name(&mut violations, "lastName", &req.last_name);

    if req.email.trim().is_empty() {
        violations.insert("email".into(), "Email is required".into());
    } else if req.email.len() > MAX_EMAIL_LEN || !req.email.validate_email() {
        violations.insert("email".into(), "Email should be valid".into());
    }

    if req.position.trim().is_empty() {
        violations.insert("position".into(), "Position is required".into());
    }
    if req.department.trim().is_empty() {
        violations.insert("department".into(), "Department is required".into());
    }

    match req.salary {
        None => {
            violations.insert("salary".into(), "Salary is required".into());
        }
        Some(salary) => check_salary(&mut violations, salary),
    }

    match req.hire_date {
        None => {
            violations.insert("hireDate".into(), "Hire date is required".into());
        }
        Some(hire_date) if hire_date > today => {
            violations.insert("hireDate".into(), "Hire date cannot be in the future".into());
        }
        Some(_) => {}
    }

    if let Some(phone) = &req.phone_number
        && !phone.is_empty()
        && !PHONE_RE.is_match(phone)
    {
        violations.insert("phoneNumber".into(), "Phone number should be valid".into());
    }

    if let Some(zip) = &req.zip_code
        && !zip.is_empty()
        && !ZIP_RE.is_match(zip)
    {
        violations.insert("zipCode".into(), "Zip code format is invalid".into());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(
            AppError::with_message(ErrorCode::ValidationFailed, "Validation failed")
                .with_details(violations),
        )
    }
}

fn check_name(violations: &mut HashMap<String, Value>, field: &str, value: &str) {
    let len = value.trim().chars().count();
    if len == 0 {
        violations.insert(
            field.to_string(),
            format!("{} is required", display_name(field)).into(),
        );
    } else if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        violations.insert(
            field.to_string(),
            format!(
                "{} must be between {} and {} characters",
                display_name(field),
                MIN_NAME_LEN,
                MAX_NAME_LEN
            )
            .into(),
        );
    }
}

fn check_salary(violations: &mut HashMap<String, Value>, salary: Decimal) {
    if salary <= Decimal::ZERO {
        violations.insert("salary".into(), "Salary must be greater than 0".into());
        return;
    }
    let max = Decimal::from(10u64.pow(MAX_SALARY_INTEGER_DIGITS));
    if salary >= max || salary.normalize().scale() > MAX_SALARY_FRACTION_DIGITS {
        violations.insert("salary".into(), "Salary format is invalid".into());
    }
}

fn display_name(field: &str) -> &'static str {
    match field {
        "firstName" => "First name",
        "lastName" => "Last name",
        _ => "Field",
    }
}
