use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, ApiResult, HrmsApi};
use crate::model::{DashboardSummary, Employee, MarkAttendance, NewEmployee, RawAttendance};

const API_V1: &str = "/api/v1";

/// [`HrmsApi`] over HTTP with reqwest.
#[derive(Clone, Debug)]
pub struct HttpHrmsApi {
    client: Client,
    base: String,
}

impl HttpHrmsApi {
    /// `base_url` is the server root; `/api/v1` is appended here. No timeout is
    /// applied unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: format!("{}{}", base_url.trim_end_matches('/'), API_V1),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(network)?;
        read_json(response).await
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Turn a response into its JSON body. Non-success statuses become
/// [`ApiError::Status`] carrying whatever JSON the backend sent; an empty
/// success body reads as `null`.
async fn read_json(response: Response) -> ApiResult<Value> {
    let status = response.status();
    let text = response.text().await.map_err(network)?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: serde_json::from_str(&text).ok(),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a list endpoint body. Anything that is not a JSON array counts as
/// an empty list.
fn list_from<T: DeserializeOwned>(body: Value) -> ApiResult<Vec<T>> {
    match body {
        Value::Array(_) => serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string())),
        _ => Ok(Vec::new()),
    }
}

#[async_trait]
impl HrmsApi for HttpHrmsApi {
    async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        list_from(self.get_json("/employees/").await?)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<()> {
        let url = self.url("/employees/");
        debug!(%url, employee_code = %employee.employee_code, "POST");
        let response = self
            .client
            .post(&url)
            .json(employee)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await.map(|_| ())
    }

    async fn delete_employee(&self, id: u64) -> ApiResult<()> {
        let url = self.url(&format!("/employees/{id}"));
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await.map_err(network)?;
        read_json(response).await.map(|_| ())
    }

    async fn list_attendance(&self, employee_id: u64) -> ApiResult<Vec<RawAttendance>> {
        list_from(self.get_json(&format!("/attendance/{employee_id}")).await?)
    }

    async fn mark_attendance(&self, mark: &MarkAttendance) -> ApiResult<Option<RawAttendance>> {
        let url = self.url("/attendance/");
        debug!(%url, employee_id = mark.employee_id, date = %mark.date, "POST");
        let response = self
            .client
            .post(&url)
            .json(mark)
            .send()
            .await
            .map_err(network)?;
        let body = read_json(response).await?;
        Ok(serde_json::from_value(body).ok())
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        let body = self.get_json("/dashboard/summary").await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
