//! Employee service
//!
//! Business rules on top of the repository: validation, email
//! uniqueness, status resolution, pagination defaults. Handlers stay
//! thin and call into here.

use std::collections::HashMap;

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
use shared::validation::validate_employee_request;
use shared::{AppError, AppResult, ErrorCode, Page, PageQuery};

use crate::db::DbService;
use crate::db::models::EmployeeData;
use crate::db::repository::{EmployeeRepository, PageRequest, RepoError, SortDir, sort_column};

/// Employee service
#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(db: DbService) -> Self {
        Self {
            repo: EmployeeRepository::new(db),
        }
    }

    // ==================== CRUD ====================

    /// Create an employee
    ///
    /// Status defaults to ACTIVE when omitted. The email pre-check gives
    /// a friendly 409; the UNIQUE constraint backstops concurrent
    /// creates.
    pub async fn create(&self, req: EmployeeRequest) -> AppResult<EmployeeResponse> {
        validate_employee_request(&req)?;

        if self.repo.exists_by_email(&req.email).await? {
            return Err(AppError::duplicate_email(req.email));
        }

        let email = req.email.clone();
        let status = req.status.unwrap_or(EmployeeStatus::Active);
        let data = EmployeeData::from_request(req, status)
            .ok_or_else(|| AppError::validation("Salary and hire date are required"))?;

        match self.repo.insert(data).await {
            Ok(row) => Ok(row.into()),
            Err(RepoError::Duplicate(_)) => Err(AppError::duplicate_email(email)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<EmployeeResponse> {
        let row = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))?;
        Ok(row.into())
    }

    /// Update an employee, replacing every mutable field
    ///
    /// An omitted status keeps the stored one; the email uniqueness
    /// check only runs when the email actually changes.
    pub async fn update(&self, id: i64, req: EmployeeRequest) -> AppResult<EmployeeResponse> {
        validate_employee_request(&req)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))?;

        if req.email != existing.email && self.repo.exists_by_email_excluding(&req.email, id).await?
        {
            return Err(AppError::duplicate_email(req.email));
        }

        let email = req.email.clone();
        let status = req.status.unwrap_or(existing.status);
        let data = EmployeeData::from_request(req, status)
            .ok_or_else(|| AppError::validation("Salary and hire date are required"))?;

        match self.repo.update(id, data).await {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => Err(AppError::employee_not_found(id)),
            Err(RepoError::Duplicate(_)) => Err(AppError::duplicate_email(email)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::employee_not_found(id))
        }
    }

    // ==================== Listing and search ====================

    pub async fn list(&self, query: &PageQuery) -> AppResult<Page<EmployeeResponse>> {
        let page = self.page_request(query)?;
        let (rows, total) = self.repo.find_page(&page).await?;
        Ok(to_page(rows, total, query))
    }

    pub async fn search(
        &self,
        term: &str,
        query: &PageQuery,
    ) -> AppResult<Page<EmployeeResponse>> {
        let page = self.page_request(query)?;
        let (rows, total) = self.repo.search(term, &page).await?;
        Ok(to_page(rows, total, query))
    }

    pub async fn by_department(
        &self,
        department: &str,
        query: &PageQuery,
    ) -> AppResult<Page<EmployeeResponse>> {
        let page = self.page_request(query)?;
        let (rows, total) = self.repo.find_by_department(department, &page).await?;
        Ok(to_page(rows, total, query))
    }

    pub async fn by_position(
        &self,
        position: &str,
        query: &PageQuery,
    ) -> AppResult<Page<EmployeeResponse>> {
        let page = self.page_request(query)?;
        let (rows, total) = self.repo.find_by_position(position, &page).await?;
        Ok(to_page(rows, total, query))
    }

    // ==================== Filters ====================

    pub async fn by_status(&self, status: &str) -> AppResult<Vec<EmployeeResponse>> {
        let status = parse_status(status)?;
        let rows = self.repo.find_by_status(status).await?;
        Ok(to_responses(rows))
    }

    pub async fn by_department_and_status(
        &self,
        department: &str,
        status: &str,
    ) -> AppResult<Vec<EmployeeResponse>> {
        let status = parse_status(status)?;
        let rows = self
            .repo
            .find_by_department_and_status(department, status)
            .await?;
        Ok(to_responses(rows))
    }

    /// Employees hired in the inclusive date range
    pub async fn hired_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<EmployeeResponse>> {
        let rows = self.repo.find_hired_between(start, end).await?;
        Ok(to_responses(rows))
    }

    pub async fn salary_greater_than(&self, min: Decimal) -> AppResult<Vec<EmployeeResponse>> {
        let rows = self.repo.find_salary_greater_than(min).await?;
        Ok(to_responses(rows))
    }

    /// Salary in the inclusive range, both bounds included
    pub async fn salary_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> AppResult<Vec<EmployeeResponse>> {
        let rows = self.repo.find_salary_between(min, max).await?;
        Ok(to_responses(rows))
    }

    /// Employees hired within the last `months` months
    pub async fn recently_hired(&self, months: u32) -> AppResult<Vec<EmployeeResponse>> {
        let today = Utc::now().date_naive();
        let cutoff = today
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| AppError::validation("months is out of range"))?;
        self.hired_since(cutoff).await
    }

    /// Employees hired on or after the cutoff date
    pub async fn hired_since(&self, cutoff: NaiveDate) -> AppResult<Vec<EmployeeResponse>> {
        let rows = self.repo.find_hired_since(cutoff).await?;
        Ok(to_responses(rows))
    }

    // ==================== Aggregates ====================

    /// Employee count per department
    pub async fn department_statistics(&self) -> AppResult<HashMap<String, i64>> {
        let rows = self.repo.count_by_department().await?;
        Ok(rows.into_iter().collect())
    }

    /// Employee count per status
    pub async fn status_statistics(&self) -> AppResult<HashMap<String, i64>> {
        let rows = self.repo.count_by_status().await?;
        Ok(rows.into_iter().collect())
    }

    // ==================== Helpers ====================

    /// Resolve query parameters into a concrete page request
    ///
    /// Unknown sort fields and directions are rejected, never silently
    /// replaced with a default.
    fn page_request(&self, query: &PageQuery) -> AppResult<PageRequest> {
        let column = sort_column(query.sort_by())
            .ok_or_else(|| AppError::invalid_sort_field(query.sort_by()))?;
        let dir = SortDir::parse(query.sort_dir()).ok_or_else(|| {
            AppError::validation("sortDir must be 'asc' or 'desc'")
                .with_detail("sortDir", query.sort_dir())
        })?;
        Ok(PageRequest::new(query.page(), query.size(), column, dir))
    }
}

fn parse_status(s: &str) -> AppResult<EmployeeStatus> {
    s.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidStatus,
            format!("'{s}' is not a valid employee status"),
        )
        .with_detail("status", s)
    })
}

fn to_responses(rows: Vec<crate::db::models::Employee>) -> Vec<EmployeeResponse> {
    rows.into_iter().map(Into::into).collect()
}

fn to_page(
    rows: Vec<crate::db::models::Employee>,
    total: i64,
    query: &PageQuery,
) -> Page<EmployeeResponse> {
    Page::new(to_responses(rows), total, query.page(), query.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ServerState;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    async fn service() -> EmployeeService {
        ServerState::in_memory().await.unwrap().employee_service()
    }

    fn request(email: &str, department: &str, salary: &str, hired: &str) -> EmployeeRequest {
        EmployeeRequest {
            first_name: "Test".into(),
            last_name: "Person".into(),
            email: email.into(),
            department: department.into(),
            position: "Engineer".into(),
            salary: Some(Decimal::from_str(salary).unwrap()),
            hire_date: Some(NaiveDate::from_str(hired).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_active() {
        let svc = service().await;
        let created = svc
            .create(request("a@example.com", "Engineering", "50000.00", "2022-01-10"))
            .await
            .unwrap();
        assert_eq!(created.status, EmployeeStatus::Active);
        assert_eq!(created.full_name, "Test Person");
        assert!(created.id > 0);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let svc = service().await;
        svc.create(request("dup@example.com", "Sales", "40000.00", "2021-05-01"))
            .await
            .unwrap();
        let err = svc
            .create(request("dup@example.com", "Sales", "41000.00", "2021-06-01"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_update_keeps_status_when_omitted() {
        let svc = service().await;
        let mut req = request("b@example.com", "Sales", "40000.00", "2021-05-01");
        req.status = Some(EmployeeStatus::OnLeave);
        let created = svc.create(req).await.unwrap();

        let update = request("b@example.com", "Sales", "45000.00", "2021-05-01");
        let updated = svc.update(created.id, update).await.unwrap();
        assert_eq!(updated.status, EmployeeStatus::OnLeave);
        assert_eq!(updated.salary, Decimal::from_str("45000").unwrap());
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_same_email_allowed() {
        let svc = service().await;
        let created = svc
            .create(request("same@example.com", "HR", "30000.00", "2020-02-02"))
            .await
            .unwrap();
        let updated = svc
            .update(created.id, request("same@example.com", "HR", "31000.00", "2020-02-02"))
            .await
            .unwrap();
        assert_eq!(updated.email, "same@example.com");
    }

    #[tokio::test]
    async fn test_update_rejects_email_taken_by_other() {
        let svc = service().await;
        svc.create(request("one@example.com", "HR", "30000.00", "2020-02-02"))
            .await
            .unwrap();
        let two = svc
            .create(request("two@example.com", "HR", "30000.00", "2020-02-02"))
            .await
            .unwrap();
        let err = svc
            .update(two.id, request("one@example.com", "HR", "30000.00", "2020-02-02"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let svc = service().await;
        let err = svc.delete(999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_list_pagination_math() {
        let svc = service().await;
        for i in 0..25 {
            svc.create(request(
                &format!("p{i}@example.com"),
                "Engineering",
                "50000.00",
                "2022-01-10",
            ))
            .await
            .unwrap();
        }

        let query = PageQuery::default();
        let page = svc.list(&query).await.unwrap();
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content.len(), 10);
        assert!(page.first);
        assert!(!page.last);

        let last = svc
            .list(&PageQuery {
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(last.content.len(), 5);
        assert!(last.last);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort_field() {
        let svc = service().await;
        let err = svc
            .list(&PageQuery {
                sort_by: Some("favoriteColor".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSortField);
    }

    #[tokio::test]
    async fn test_salary_between_is_inclusive() {
        let svc = service().await;
        svc.create(request("low@example.com", "Sales", "49999.99", "2021-01-01"))
            .await
            .unwrap();
        svc.create(request("min@example.com", "Sales", "50000.00", "2021-01-01"))
            .await
            .unwrap();
        svc.create(request("max@example.com", "Sales", "100000.00", "2021-01-01"))
            .await
            .unwrap();

        let hits = svc
            .salary_between(
                Decimal::from_str("50000.00").unwrap(),
                Decimal::from_str("100000.00").unwrap(),
            )
            .await
            .unwrap();
        let emails: Vec<_> = hits.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, ["min@example.com", "max@example.com"]);
    }

    #[tokio::test]
    async fn test_hired_since_cutoff_inclusive() {
        let svc = service().await;
        svc.create(request("old@example.com", "Ops", "30000.00", "2019-03-01"))
            .await
            .unwrap();
        svc.create(request("edge@example.com", "Ops", "30000.00", "2024-06-15"))
            .await
            .unwrap();
        svc.create(request("new@example.com", "Ops", "30000.00", "2024-09-01"))
            .await
            .unwrap();

        let hits = svc
            .hired_since(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .await
            .unwrap();
        let emails: Vec<_> = hits.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, ["edge@example.com", "new@example.com"]);
    }

    #[tokio::test]
    async fn test_statistics_sum_to_total() {
        let svc = service().await;
        svc.create(request("e1@example.com", "Engineering", "50000.00", "2022-01-01"))
            .await
            .unwrap();
        svc.create(request("e2@example.com", "Engineering", "50000.00", "2022-01-01"))
            .await
            .unwrap();
        svc.create(request("s1@example.com", "Sales", "40000.00", "2022-01-01"))
            .await
            .unwrap();

        let by_dept = svc.department_statistics().await.unwrap();
        assert_eq!(by_dept.get("Engineering"), Some(&2));
        assert_eq!(by_dept.get("Sales"), Some(&1));
        assert_eq!(by_dept.values().sum::<i64>(), 3);

        let by_status = svc.status_statistics().await.unwrap();
        assert_eq!(by_status.get("ACTIVE"), Some(&3));
    }

    #[tokio::test]
    async fn test_by_department_and_status() {
        let svc = service().await;
        let mut active = request("act@example.com", "Engineering", "50000.00", "2022-01-01");
        active.status = Some(EmployeeStatus::Active);
        svc.create(active).await.unwrap();
        let mut leave = request("leave@example.com", "Engineering", "50000.00", "2022-01-01");
        leave.status = Some(EmployeeStatus::OnLeave);
        svc.create(leave).await.unwrap();

        let hits = svc
            .by_department_and_status("Engineering", "ON_LEAVE")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].email, "leave@example.com");
    }

    #[tokio::test]
    async fn test_invalid_status_filter_rejected() {
        let svc = service().await;
        let err = svc.by_status("RETIRED").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);
    }
}
