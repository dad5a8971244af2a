//! Employee API Handlers
//!
//! Parse path and query parameters into typed values, delegate to the
//! service, map results to responses. Malformed parameters become
//! ValidationFailed (400) rather than framework rejections.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{EmployeeRequest, EmployeeResponse};
use shared::{AppError, AppResult, Page, PageQuery};

use crate::core::ServerState;

/// Pagination parameters, taken as raw strings
///
/// Typed extraction would surface `?page=abc` as a plain-text
/// framework rejection; parsing by hand keeps the JSON error shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PageParams {
    fn page_query(self) -> AppResult<PageQuery> {
        Ok(PageQuery {
            page: parse_count("page", self.page.as_deref())?,
            size: parse_count("size", self.size.as_deref())?,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
        })
    }
}

/// Search parameters: the free-text term plus pagination
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl SearchQuery {
    fn page_query(&self) -> AppResult<PageQuery> {
        Ok(PageQuery {
            page: parse_count("page", self.page.as_deref())?,
            size: parse_count("size", self.size.as_deref())?,
            sort_by: self.sort_by.clone(),
            sort_dir: self.sort_dir.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiredBetweenQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRangeQuery {
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
}

// ==================== CRUD ====================

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let created = state.employee_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let employee = state.employee_service().get(id).await?;
    Ok(Json(employee))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<EmployeeResponse>>> {
    let query = params.page_query()?;
    let page = state.employee_service().list(&query).await?;
    Ok(Json(page))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let updated = state.employee_service().update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    state.employee_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Search and filters ====================

pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Page<EmployeeResponse>>> {
    let term = params
        .query
        .as_deref()
        .ok_or_else(|| AppError::validation("'query' parameter is required"))?;
    let page = state
        .employee_service()
        .search(term, &params.page_query()?)
        .await?;
    Ok(Json(page))
}

pub async fn by_department(
    State(state): State<ServerState>,
    Path(department): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<EmployeeResponse>>> {
    let query = params.page_query()?;
    let page = state
        .employee_service()
        .by_department(&department, &query)
        .await?;
    Ok(Json(page))
}

pub async fn by_position(
    State(state): State<ServerState>,
    Path(position): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<EmployeeResponse>>> {
    let query = params.page_query()?;
    let page = state
        .employee_service()
        .by_position(&position, &query)
        .await?;
    Ok(Json(page))
}

pub async fn by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employee_service().by_status(&status).await?;
    Ok(Json(employees))
}

pub async fn hired_between(
    State(state): State<ServerState>,
    Query(params): Query<HiredBetweenQuery>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let start = parse_date("startDate", params.start_date.as_deref())?;
    let end = parse_date("endDate", params.end_date.as_deref())?;
    let employees = state.employee_service().hired_between(start, end).await?;
    Ok(Json(employees))
}

pub async fn recently_hired(
    State(state): State<ServerState>,
    Path(months): Path<String>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let months: u32 = months.parse().map_err(|_| {
        AppError::validation(format!("'{months}' is not a valid number of months"))
            .with_detail("months", months.as_str())
    })?;
    let employees = state.employee_service().recently_hired(months).await?;
    Ok(Json(employees))
}

pub async fn salary_greater_than(
    State(state): State<ServerState>,
    Path(amount): Path<String>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let amount = parse_decimal("amount", Some(&amount))?;
    let employees = state.employee_service().salary_greater_than(amount).await?;
    Ok(Json(employees))
}

pub async fn salary_between(
    State(state): State<ServerState>,
    Query(params): Query<SalaryRangeQuery>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let min = parse_decimal("minSalary", params.min_salary.as_deref())?;
    let max = parse_decimal("maxSalary", params.max_salary.as_deref())?;
    let employees = state.employee_service().salary_between(min, max).await?;
    Ok(Json(employees))
}

// ==================== Aggregates ====================

pub async fn department_statistics(
    State(state): State<ServerState>,
) -> AppResult<Json<HashMap<String, i64>>> {
    let stats = state.employee_service().department_statistics().await?;
    Ok(Json(stats))
}

pub async fn status_statistics(
    State(state): State<ServerState>,
) -> AppResult<Json<HashMap<String, i64>>> {
    let stats = state.employee_service().status_statistics().await?;
    Ok(Json(stats))
}

// ==================== Parameter parsing ====================

fn parse_count(name: &str, raw: Option<&str>) -> AppResult<Option<i64>> {
    raw.map(|raw| {
        raw.parse().map_err(|_| {
            AppError::validation(format!("'{raw}' is not a valid {name}")).with_detail(name, raw)
        })
    })
    .transpose()
}

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| {
        AppError::validation(format!("'{raw}' is not a valid employee id")).with_detail("id", raw)
    })
}

fn parse_date(name: &str, raw: Option<&str>) -> AppResult<NaiveDate> {
    let raw = raw
        .ok_or_else(|| AppError::validation(format!("'{name}' parameter is required")))?;
    raw.parse().map_err(|_| {
        AppError::validation(format!("'{raw}' is not a valid date (expected YYYY-MM-DD)"))
            .with_detail(name, raw)
    })
}

fn parse_decimal(name: &str, raw: Option<&str>) -> AppResult<Decimal> {
    let raw = raw
        .ok_or_else(|| AppError::validation(format!("'{name}' parameter is required")))?;
    raw.parse().map_err(|_| {
        AppError::validation(format!("'{raw}' is not a valid amount")).with_detail(name, raw)
    })
}
