//! Database row models

pub mod employee;

pub use employee::{Employee, EmployeeData};
