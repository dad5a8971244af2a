//! HTTP client for the Roster employee API
//!
//! One typed method per server endpoint. Payloads for create/update run
//! through the shared validation rules first, so malformed submissions
//! fail without a network round-trip.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeStatus};
use shared::validation::validate_employee_request;
use shared::{ApiResponse, Page, PageQuery};

use crate::cache::ResponseCache;
use crate::{ClientConfig, ClientError, ClientResult};

/// Cache key for department statistics
pub const DEPARTMENT_STATS_KEY: &str = "statistics/departments";
/// Cache key for status statistics
pub const STATUS_STATS_KEY: &str = "statistics/status";

/// Typed HTTP client for the employee API
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    client: Client,
    base_url: String,
}

impl EmployeeClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/employees{}", self.base_url, path)
    }

    // ========== CRUD ==========

    pub async fn create_employee(&self, req: &EmployeeRequest) -> ClientResult<EmployeeResponse> {
        validate_employee_request(req).map_err(ClientError::Validation)?;
        let response = self.client.post(self.url("")).json(req).send().await?;
        Self::parse_json(response).await
    }

    pub async fn get_employee(&self, id: i64) -> ClientResult<EmployeeResponse> {
        let response = self.client.get(self.url(&format!("/{id}"))).send().await?;
        Self::parse_json(response).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        req: &EmployeeRequest,
    ) -> ClientResult<EmployeeResponse> {
        validate_employee_request(req).map_err(ClientError::Validation)?;
        let response = self
            .client
            .put(self.url(&format!("/{id}")))
            .json(req)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Delete an employee; 204 or an empty body counts as success
    pub async fn delete_employee(&self, id: i64) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?;
        Self::expect_empty(response).await
    }

    // ========== Listing and search ==========

    pub async fn list_employees(
        &self,
        query: &PageQuery,
    ) -> ClientResult<Page<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(""))
            .query(&page_params(query))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn search(
        &self,
        term: &str,
        query: &PageQuery,
    ) -> ClientResult<Page<EmployeeResponse>> {
        let mut params = page_params(query);
        params.push(("query".into(), term.to_string()));
        let response = self
            .client
            .get(self.url("/search"))
            .query(&params)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn by_department(
        &self,
        department: &str,
        query: &PageQuery,
    ) -> ClientResult<Page<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(&format!("/department/{department}")))
            .query(&page_params(query))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn by_position(
        &self,
        position: &str,
        query: &PageQuery,
    ) -> ClientResult<Page<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(&format!("/position/{position}")))
            .query(&page_params(query))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    // ========== Filters ==========

    pub async fn by_status(&self, status: EmployeeStatus) -> ClientResult<Vec<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(&format!("/status/{}", status.as_str())))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn hired_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Vec<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url("/hired-between"))
            .query(&[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ])
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn recently_hired(&self, months: u32) -> ClientResult<Vec<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(&format!("/recently-hired/{months}")))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn salary_greater_than(
        &self,
        amount: Decimal,
    ) -> ClientResult<Vec<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url(&format!("/salary/greater-than/{amount}")))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn salary_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ClientResult<Vec<EmployeeResponse>> {
        let response = self
            .client
            .get(self.url("/salary/between"))
            .query(&[
                ("minSalary", min.to_string()),
                ("maxSalary", max.to_string()),
            ])
            .send()
            .await?;
        Self::parse_json(response).await
    }

    // ========== Aggregates ==========

    pub async fn department_statistics(&self) -> ClientResult<HashMap<String, i64>> {
        let response = self
            .client
            .get(self.url("/statistics/departments"))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    pub async fn status_statistics(&self) -> ClientResult<HashMap<String, i64>> {
        let response = self
            .client
            .get(self.url("/statistics/status"))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Department statistics through the opt-in cache
    pub async fn department_statistics_cached(
        &self,
        cache: &ResponseCache,
    ) -> ClientResult<HashMap<String, i64>> {
        self.cached(cache, DEPARTMENT_STATS_KEY, || {
            self.department_statistics()
        })
        .await
    }

    /// Status statistics through the opt-in cache
    pub async fn status_statistics_cached(
        &self,
        cache: &ResponseCache,
    ) -> ClientResult<HashMap<String, i64>> {
        self.cached(cache, STATUS_STATS_KEY, || self.status_statistics())
            .await
    }

    async fn cached<T, F, Fut>(
        &self,
        cache: &ResponseCache,
        key: &str,
        fetch: F,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned + serde::Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(hit) = cache.get(key) {
            tracing::debug!(key, "cache hit");
            return serde_json::from_value(hit).map_err(Into::into);
        }
        let value = fetch().await?;
        cache.put(key, serde_json::to_value(&value)?);
        Ok(value)
    }

    // ========== Response handling ==========

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &bytes));
        }
        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse("Empty response body".into()));
        }
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    async fn expect_empty(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &bytes));
        }
        Ok(())
    }

    /// Build an API error from the response body, falling back to the
    /// raw text when it is not the standard error shape
    fn api_error(status: u16, bytes: &[u8]) -> ClientError {
        match serde_json::from_slice::<ApiResponse<Value>>(bytes) {
            Ok(body) => ClientError::Api {
                status,
                code: body.code,
                message: body.message,
                details: body.details,
            },
            Err(_) => ClientError::Api {
                status,
                code: None,
                message: String::from_utf8_lossy(bytes).into_owned(),
                details: None,
            },
        }
    }
}

fn page_params(query: &PageQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(page) = query.page {
        params.push(("page".into(), page.to_string()));
    }
    if let Some(size) = query.size {
        params.push(("size".into(), size.to_string()));
    }
    if let Some(sort_by) = &query.sort_by {
        params.push(("sortBy".into(), sort_by.clone()));
    }
    if let Some(sort_dir) = &query.sort_dir {
        params.push(("sortDir".into(), sort_dir.clone()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_page_params_skip_defaults() {
        let query = PageQuery::default();
        assert!(page_params(&query).is_empty());

        let query = PageQuery {
            page: Some(2),
            size: Some(5),
            sort_by: Some("lastName".into()),
            sort_dir: Some("desc".into()),
        };
        let params = page_params(&query);
        assert_eq!(params.len(), 4);
        assert!(params.contains(&("sortBy".into(), "lastName".into())));
    }

    #[test]
    fn test_api_error_parses_standard_body() {
        let body = br#"{"code":8001,"message":"Employee 42 not found"}"#;
        let err = EmployeeClient::api_error(404, body);
        match err {
            ClientError::Api {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, Some(8001));
                assert_eq!(message, "Employee 42 not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_text() {
        let err = EmployeeClient::api_error(502, b"Bad Gateway");
        match err {
            ClientError::Api { code, message, .. } => {
                assert_eq!(code, None);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload_locally() {
        let client = ClientConfig::new("http://localhost:1").build_client();
        let err = client
            .create_employee(&EmployeeRequest::default())
            .await
            .unwrap_err();
        match err {
            ClientError::Validation(app_err) => {
                assert_eq!(app_err.code, ErrorCode::ValidationFailed);
                assert!(app_err.details.unwrap().contains_key("email"));
            }
            other => panic!("expected local validation error, got {other:?}"),
        }
    }
}
