//! Employee DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
    Terminated,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 4] = [
        EmployeeStatus::Active,
        EmployeeStatus::Inactive,
        EmployeeStatus::OnLeave,
        EmployeeStatus::Terminated,
    ];

    /// Wire representation (matches the serde rename)
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::Inactive => "INACTIVE",
            EmployeeStatus::OnLeave => "ON_LEAVE",
            EmployeeStatus::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status value
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown employee status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for EmployeeStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EmployeeStatus::Active),
            "INACTIVE" => Ok(EmployeeStatus::Inactive),
            "ON_LEAVE" => Ok(EmployeeStatus::OnLeave),
            "TERMINATED" => Ok(EmployeeStatus::Terminated),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for EmployeeStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Create/update employee payload
///
/// Required fields use `#[serde(default)]` so that a missing field surfaces
/// as a per-field validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Defaults to ACTIVE on create when omitted
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
}

/// Employee response (server-computed fields included)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
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
    /// first name + last name, computed by the server
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in EmployeeStatus::ALL {
            let parsed: EmployeeStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_serde_wire_format() {
        let json = serde_json::to_string(&EmployeeStatus::OnLeave).unwrap();
        assert_eq!(json, "\"ON_LEAVE\"");
        let back: EmployeeStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EmployeeStatus::OnLeave);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("RETIRED".parse::<EmployeeStatus>().is_err());
        assert!("active".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_request_missing_fields_default() {
        // A sparse body deserializes; validation reports the gaps later
        let req: EmployeeRequest = serde_json::from_str(r#"{"firstName":"Ada"}"#).unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.last_name, "");
        assert!(req.salary.is_none());
        assert!(req.hire_date.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn test_request_camel_case_fields() {
        let json = r#"{
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "department": "Engineering",
            "position": "Rear Admiral",
            "salary": 125000.50,
            "hireDate": "1944-07-02",
            "zipCode": "02134"
        }"#;
        let req: EmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "grace@example.com");
        assert_eq!(req.hire_date.unwrap().to_string(), "1944-07-02");
        assert_eq!(req.zip_code.as_deref(), Some("02134"));
    }
}
