//! Roster Client - HTTP client and dashboard state for the Roster API
//!
//! Provides a typed client per server endpoint, an opt-in response
//! cache, and the dashboard view state machine.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod ui;

pub use cache::ResponseCache;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::EmployeeClient;
pub use ui::{Dashboard, Modal, SearchCriteria, View};

// Re-export shared types for convenience
pub use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
pub use shared::{Page, PageQuery};
