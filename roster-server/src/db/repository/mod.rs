//! Repository Module
//!
//! Explicit, named query functions over the SQLite pool. Each query the
//! application runs has its own function; nothing is derived from
//! method names at runtime.

pub mod employee;

pub use employee::EmployeeRepository;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Sort direction for paged queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// Parse "asc"/"desc" case-insensitively; anything else is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Map an API sort field to its column name
///
/// Both camelCase (wire) and snake_case spellings are accepted; unknown
/// fields return `None` and must be rejected by the caller, never
/// silently ignored.
pub fn sort_column(field: &str) -> Option<&'static str> {
    Some(match field {
        "id" => "id",
        "firstName" | "first_name" => "first_name",
        "lastName" | "last_name" => "last_name",
        "email" => "email",
        "phoneNumber" | "phone_number" => "phone_number",
        "department" => "department",
        "position" => "position",
        "salary" => "salary",
        "hireDate" | "hire_date" => "hire_date",
        "status" => "status",
        "city" => "city",
        "state" => "state",
        "zipCode" | "zip_code" => "zip_code",
        "createdAt" | "created_at" => "created_at",
        "updatedAt" | "updated_at" => "updated_at",
        _ => return None,
    })
}

/// Resolved pagination for a SQL query
///
/// `order_by` is always one of the whitelisted column names from
/// [`sort_column`], so interpolating it into SQL is safe.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
    pub order_by: &'static str,
    pub dir: SortDir,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, order_by: &'static str, dir: SortDir) -> Self {
        let page = page.max(0);
        let size = size.max(1);
        Self {
            limit: size,
            offset: page * size,
            order_by,
            dir,
        }
    }

    pub fn order_clause(&self) -> String {
        format!("ORDER BY {} {}", self.order_by, self.dir.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("firstName"), Some("first_name"));
        assert_eq!(sort_column("first_name"), Some("first_name"));
        assert_eq!(sort_column("salary"), Some("salary"));
        assert_eq!(sort_column("id; DROP TABLE employees"), None);
        assert_eq!(sort_column("unknown"), None);
    }

    #[test]
    fn test_sort_dir_parse() {
        assert_eq!(SortDir::parse("ASC"), Some(SortDir::Asc));
        assert_eq!(SortDir::parse("desc"), Some(SortDir::Desc));
        assert_eq!(SortDir::parse("sideways"), None);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(2, 10, "id", SortDir::Asc);
        assert_eq!(page.offset, 20);
        assert_eq!(page.limit, 10);
        assert_eq!(page.order_clause(), "ORDER BY id ASC");
    }

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(-1, 0, "id", SortDir::Desc);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 1);
    }
}
