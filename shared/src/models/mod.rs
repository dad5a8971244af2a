//! Data models crossing the API boundary

pub mod employee;

pub use employee::{EmployeeRequest, EmployeeResponse, EmployeeStatus, ParseStatusError};
