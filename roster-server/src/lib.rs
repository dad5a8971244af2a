//! Roster Server - employee directory REST API
//!
//! # Module structure
//!
//! ```text
//! roster-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── api/           # Routes and handlers
//! ├── services/      # Business rules
//! ├── db/            # SQLite pool, models, repositories
//! └── utils/         # Logging helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use services::EmployeeService;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// One-time process setup: dotenv, then logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
