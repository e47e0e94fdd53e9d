//! Access to the remote HRM REST API (`/api/v1`).
//!
//! Services depend on the [`HrmsApi`] trait only, so tests can swap the
//! reqwest-backed [`HttpHrmsApi`] for an in-memory stub.

pub mod http;
pub mod message;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{DashboardSummary, Employee, MarkAttendance, NewEmployee, RawAttendance};

pub use http::HttpHrmsApi;
pub use message::error_message;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single API call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status. `body` holds the JSON
    /// error payload when there was one.
    #[error("backend returned status {status}")]
    Status { status: u16, body: Option<Value> },

    /// A success response whose body could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[async_trait]
pub trait HrmsApi: Send + Sync {
    /// `GET /employees/`
    async fn list_employees(&self) -> ApiResult<Vec<Employee>>;

    /// `POST /employees/`. The created record is not needed: the roster is
    /// always refetched after a mutation.
    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<()>;

    /// `DELETE /employees/{id}`
    async fn delete_employee(&self, id: u64) -> ApiResult<()>;

    /// `GET /attendance/{employee_id}`
    async fn list_attendance(&self, employee_id: u64) -> ApiResult<Vec<RawAttendance>>;

    /// `POST /attendance/`. Returns the created record when the backend sends
    /// one back in a recognizable shape.
    async fn mark_attendance(&self, mark: &MarkAttendance) -> ApiResult<Option<RawAttendance>>;

    /// `GET /dashboard/summary`
    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary>;
}
