//! Page envelope and pagination query parameters

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Default sort field
pub const DEFAULT_SORT_FIELD: &str = "id";
/// Default sort direction
pub const DEFAULT_SORT_DIR: &str = "asc";

/// A slice of results plus pagination metadata
///
/// ```json
/// {
///   "content": [...],
///   "totalElements": 25,
///   "totalPages": 3,
///   "number": 0,
///   "size": 10,
///   "first": true,
///   "last": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// 0-based page index
    pub number: i64,
    pub size: i64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Build a page envelope from a slice of content and the total count
    pub fn new(content: Vec<T>, total_elements: i64, number: i64, size: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };
        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: number == 0,
            last: number + 1 >= total_pages,
        }
    }

    /// Map page content to another type, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}

/// Pagination and sorting query parameters
///
/// All fields optional; the service applies the defaults
/// (page 0, size 10, sort by id ascending).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn sort_by(&self) -> &str {
        self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD)
    }

    pub fn sort_dir(&self) -> &str {
        self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIR)
    }
}
