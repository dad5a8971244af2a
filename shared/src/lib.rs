//! Shared types for the Roster employee directory
//!
//! Common types used by both the server and the client: employee DTOs,
//! the page envelope, the unified error system, and the request
//! validation rules mirrored on both sides of the wire.

pub mod error;
pub mod models;
pub mod page;
pub mod validation;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
pub use page::{Page, PageQuery};
