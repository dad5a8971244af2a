//! Dashboard view state machine
//!
//! Views and the modal are orthogonal; every transition into a view
//! triggers the fetch that view needs, and mutations close the modal
//! and re-fetch instead of patching the in-memory list.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
use shared::{Page, PageQuery};

use super::debounce::Debouncer;
use crate::http::{DEPARTMENT_STATS_KEY, STATUS_STATS_KEY};
use crate::{ClientConfig, ClientResult, EmployeeClient, ResponseCache};

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    EmployeeList,
    Search,
    Reports,
}

/// Modal state, orthogonal to the active view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(i64),
}

/// Advanced search form contents
///
/// Several criteria can be filled in at once but only one is applied:
/// the first non-empty one in declaration order wins and the rest are
/// ignored, not combined. That mirrors the server consumers this UI
/// was built against; combining with AND semantics would change result
/// sets silently.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub query: String,
    pub department: String,
    pub position: String,
    pub status: Option<EmployeeStatus>,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub hired_from: Option<NaiveDate>,
    pub hired_to: Option<NaiveDate>,
}

/// The single filter a search fetch will use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter<'a> {
    Query(&'a str),
    Department(&'a str),
    Position(&'a str),
    Status(EmployeeStatus),
    SalaryRange(Decimal, Decimal),
    DateRange(NaiveDate, NaiveDate),
    None,
}

impl SearchCriteria {
    /// First non-empty criterion wins
    pub fn active(&self) -> ActiveFilter<'_> {
        if !self.query.trim().is_empty() {
            return ActiveFilter::Query(self.query.trim());
        }
        if !self.department.trim().is_empty() {
            return ActiveFilter::Department(self.department.trim());
        }
        if !self.position.trim().is_empty() {
            return ActiveFilter::Position(self.position.trim());
        }
        if let Some(status) = self.status {
            return ActiveFilter::Status(status);
        }
        if let (Some(min), Some(max)) = (self.min_salary, self.max_salary) {
            return ActiveFilter::SalaryRange(min, max);
        }
        if let (Some(from), Some(to)) = (self.hired_from, self.hired_to) {
            return ActiveFilter::DateRange(from, to);
        }
        ActiveFilter::None
    }
}

/// Data backing the current view
#[derive(Debug, Clone, Default)]
pub enum ViewData {
    #[default]
    Empty,
    /// Overview: first page plus per-department headcounts
    Overview {
        page: Page<EmployeeResponse>,
        by_department: HashMap<String, i64>,
    },
    /// A paged listing (employee list, paged search results)
    Listing(Page<EmployeeResponse>),
    /// An unpaged filter result
    Matches(Vec<EmployeeResponse>),
    /// Both aggregate reports
    Reports {
        by_department: HashMap<String, i64>,
        by_status: HashMap<String, i64>,
    },
}

/// Dashboard controller: current view, modal, fetch results
pub struct Dashboard {
    client: EmployeeClient,
    cache: ResponseCache,
    debouncer: Debouncer,
    search_tx: mpsc::UnboundedSender<String>,
    search_rx: mpsc::UnboundedReceiver<String>,
    pub view: View,
    pub modal: Modal,
    /// Pagination and sorting for listing views
    pub list_params: PageQuery,
    pub criteria: SearchCriteria,
    pub data: ViewData,
}

impl Dashboard {
    pub fn new(config: &ClientConfig) -> Self {
        let (search_tx, search_rx) = mpsc::unbounded_channel();
        Self {
            client: config.build_client(),
            cache: ResponseCache::with_ttl(Duration::from_secs(config.cache_ttl)),
            debouncer: Debouncer::new(),
            search_tx,
            search_rx,
            view: View::default(),
            modal: Modal::default(),
            list_params: PageQuery::default(),
            criteria: SearchCriteria::default(),
            data: ViewData::Empty,
        }
    }

    // ==================== View transitions ====================

    pub async fn show_dashboard(&mut self) -> ClientResult<()> {
        self.view = View::Dashboard;
        let default_query = PageQuery::default();
        let (page, by_department) = tokio::join!(
            self.client.list_employees(&default_query),
            self.client.department_statistics_cached(&self.cache),
        );
        self.data = ViewData::Overview {
            page: page?,
            by_department: by_department?,
        };
        Ok(())
    }

    pub async fn show_employee_list(&mut self) -> ClientResult<()> {
        self.view = View::EmployeeList;
        let page = self.client.list_employees(&self.list_params).await?;
        self.data = ViewData::Listing(page);
        Ok(())
    }

    /// Enter the search view and fetch with the active criterion
    pub async fn show_search(&mut self) -> ClientResult<()> {
        self.view = View::Search;
        self.data = match self.criteria.active() {
            ActiveFilter::Query(term) => {
                ViewData::Listing(self.client.search(term, &self.list_params).await?)
            }
            ActiveFilter::Department(dept) => {
                ViewData::Listing(self.client.by_department(dept, &self.list_params).await?)
            }
            ActiveFilter::Position(pos) => {
                ViewData::Listing(self.client.by_position(pos, &self.list_params).await?)
            }
            ActiveFilter::Status(status) => {
                ViewData::Matches(self.client.by_status(status).await?)
            }
            ActiveFilter::SalaryRange(min, max) => {
                ViewData::Matches(self.client.salary_between(min, max).await?)
            }
            ActiveFilter::DateRange(from, to) => {
                ViewData::Matches(self.client.hired_between(from, to).await?)
            }
            ActiveFilter::None => {
                ViewData::Listing(self.client.list_employees(&self.list_params).await?)
            }
        };
        Ok(())
    }

    /// Record a quick-search keystroke
    ///
    /// The fetch is debounced: each call replaces the previously
    /// scheduled delivery, and the surviving term arrives through
    /// [`Self::debounced_search`] 300 ms after the last keystroke.
    pub fn quick_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        let tx = self.search_tx.clone();
        self.debouncer.run(async move {
            let _ = tx.send(term);
        });
    }

    /// Wait for the next debounced quick-search term, then enter the
    /// search view with it
    pub async fn debounced_search(&mut self) -> ClientResult<()> {
        let Some(term) = self.search_rx.recv().await else {
            return Ok(());
        };
        self.criteria.query = term;
        self.show_search().await
    }

    /// Enter the reports view; both aggregates fetch in parallel
    pub async fn show_reports(&mut self) -> ClientResult<()> {
        self.view = View::Reports;
        let (by_department, by_status) = tokio::join!(
            self.client.department_statistics_cached(&self.cache),
            self.client.status_statistics_cached(&self.cache),
        );
        self.data = ViewData::Reports {
            by_department: by_department?,
            by_status: by_status?,
        };
        Ok(())
    }

    /// Re-fetch whatever the current view shows
    pub async fn refresh(&mut self) -> ClientResult<()> {
        match self.view {
            View::Dashboard => self.show_dashboard().await,
            View::EmployeeList => self.show_employee_list().await,
            View::Search => self.show_search().await,
            View::Reports => self.show_reports().await,
        }
    }

    // ==================== Modal ====================

    pub fn open_add(&mut self) {
        self.modal = Modal::Add;
    }

    pub fn open_edit(&mut self, id: i64) {
        self.modal = Modal::Edit(id);
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    // ==================== Mutations ====================

    /// Create, then close the modal and re-fetch the current view
    pub async fn submit_create(&mut self, req: &EmployeeRequest) -> ClientResult<EmployeeResponse> {
        let created = self.client.create_employee(req).await?;
        self.after_mutation().await?;
        Ok(created)
    }

    pub async fn submit_update(
        &mut self,
        id: i64,
        req: &EmployeeRequest,
    ) -> ClientResult<EmployeeResponse> {
        let updated = self.client.update_employee(id, req).await?;
        self.after_mutation().await?;
        Ok(updated)
    }

    pub async fn remove(&mut self, id: i64) -> ClientResult<()> {
        self.client.delete_employee(id).await?;
        self.after_mutation().await
    }

    /// Shared post-mutation path: stale aggregates out, modal closed,
    /// current view re-fetched
    async fn after_mutation(&mut self) -> ClientResult<()> {
        self.cache.invalidate(DEPARTMENT_STATS_KEY);
        self.cache.invalidate(STATUS_STATS_KEY);
        self.close_modal();
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dashboard() -> Dashboard {
        Dashboard::new(&ClientConfig::new("http://localhost:1"))
    }

    #[test]
    fn test_initial_state() {
        let dash = dashboard();
        assert_eq!(dash.view, View::Dashboard);
        assert_eq!(dash.modal, Modal::Closed);
        assert!(matches!(dash.data, ViewData::Empty));
    }

    #[test]
    fn test_modal_transitions() {
        let mut dash = dashboard();
        dash.open_add();
        assert_eq!(dash.modal, Modal::Add);
        dash.open_edit(42);
        assert_eq!(dash.modal, Modal::Edit(42));
        dash.close_modal();
        assert_eq!(dash.modal, Modal::Closed);
    }

    #[test]
    fn test_filter_precedence_query_wins() {
        let criteria = SearchCriteria {
            query: "smith".into(),
            department: "Engineering".into(),
            status: Some(EmployeeStatus::Active),
            min_salary: Some(Decimal::from_str("1000").unwrap()),
            max_salary: Some(Decimal::from_str("2000").unwrap()),
            ..Default::default()
        };
        assert_eq!(criteria.active(), ActiveFilter::Query("smith"));
    }

    #[test]
    fn test_filter_precedence_order() {
        let mut criteria = SearchCriteria {
            department: "Engineering".into(),
            position: "Engineer".into(),
            status: Some(EmployeeStatus::OnLeave),
            ..Default::default()
        };
        assert_eq!(criteria.active(), ActiveFilter::Department("Engineering"));

        criteria.department.clear();
        assert_eq!(criteria.active(), ActiveFilter::Position("Engineer"));

        criteria.position.clear();
        assert_eq!(criteria.active(), ActiveFilter::Status(EmployeeStatus::OnLeave));

        criteria.status = None;
        assert_eq!(criteria.active(), ActiveFilter::None);
    }

    #[test]
    fn test_salary_range_needs_both_bounds() {
        let criteria = SearchCriteria {
            min_salary: Some(Decimal::from_str("1000").unwrap()),
            ..Default::default()
        };
        assert_eq!(criteria.active(), ActiveFilter::None);
    }

    #[test]
    fn test_date_range_after_salary_range() {
        let criteria = SearchCriteria {
            min_salary: Some(Decimal::from_str("1000").unwrap()),
            max_salary: Some(Decimal::from_str("2000").unwrap()),
            hired_from: NaiveDate::from_ymd_opt(2020, 1, 1),
            hired_to: NaiveDate::from_ymd_opt(2021, 1, 1),
            ..Default::default()
        };
        assert!(matches!(criteria.active(), ActiveFilter::SalaryRange(_, _)));
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let criteria = SearchCriteria {
            query: "   ".into(),
            department: "Sales".into(),
            ..Default::default()
        };
        assert_eq!(criteria.active(), ActiveFilter::Department("Sales"));
    }

    #[test]
    fn test_cache_ttl_comes_from_config() {
        let dash = Dashboard::new(&ClientConfig::new("http://localhost:1").with_cache_ttl(0));
        dash.cache.put("k", serde_json::json!(1));
        assert_eq!(dash.cache.get("k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_search_delivers_one_term_per_window() {
        let mut dash = dashboard();
        for term in ["a", "al", "ali", "alice"] {
            dash.quick_search(term);
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(dash.search_rx.try_recv().ok().as_deref(), Some("alice"));
        assert!(dash.search_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_search_waits_out_the_window() {
        let mut dash = dashboard();
        dash.quick_search("smith");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(dash.search_rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(dash.search_rx.try_recv().ok().as_deref(), Some("smith"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search_enters_search_view() {
        let mut dash = dashboard();
        dash.quick_search("smith");
        tokio::time::sleep(Duration::from_millis(350)).await;

        // the fetch itself fails with no server; the transition and
        // the surviving term are still recorded
        let _ = dash.debounced_search().await;
        assert_eq!(dash.view, View::Search);
        assert_eq!(dash.criteria.query, "smith");
    }
}
