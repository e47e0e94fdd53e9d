use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::model::{AttendanceRecord, Employee};
use crate::services::aggregator::MarkAttendanceForm;
use crate::services::{AttendanceFilter, AttendanceTally};
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    pub counts: AttendanceTally,
    /// Roster used for the employee picker.
    pub employees: Vec<Employee>,
    pub loading: bool,
    #[schema(example = "Failed to mark attendance.", nullable = true)]
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceHistoryResponse {
    #[schema(example = 7)]
    pub employee_id: u64,
    /// Newest first.
    pub data: Vec<AttendanceRecord>,
}

/// Filtered attendance
///
/// Filters the records gathered by the last refresh; no backend call.
#[utoipa::path(
    get,
    path = "/console/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Filtered attendance with counts", body = AttendanceListResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    state: web::Data<AppState>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let board = &state.attendance;
    let (data, counts) = board.view(&query);

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data,
        counts,
        employees: board.roster(),
        loading: board.is_loading(),
        error: board.mark_error(),
    }))
}

/// Reload attendance
///
/// Refetches the roster and then every employee's attendance. Employees whose
/// attendance cannot be fetched are left out.
#[utoipa::path(
    post,
    path = "/console/attendance/refresh",
    responses(
        (status = 200, description = "Cache rebuilt", body = Object, example = json!({
            "employees": 3,
            "records": 42
        }))
    ),
    tag = "Attendance"
)]
pub async fn refresh_attendance(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let records = state.attendance.refresh().await;

    Ok(HttpResponse::Ok().json(json!({
        "employees": state.attendance.roster().len(),
        "records": records.len()
    })))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/console/attendance",
    request_body = MarkAttendanceForm,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 400, description = "No or unknown employee", body = Object, example = json!({
            "message": "Please select an employee."
        })),
        (status = 409, description = "A previous mark is still pending"),
        (status = 502, description = "Backend rejected the mark", body = Object, example = json!({
            "message": "Failed to mark attendance."
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    state: web::Data<AppState>,
    payload: web::Json<MarkAttendanceForm>,
) -> actix_web::Result<impl Responder> {
    let today = Local::now().date_naive();
    let record = state.attendance.submit_mark(payload.into_inner(), today).await?;

    Ok(HttpResponse::Created().json(record))
}

/// Attendance history of one employee
#[utoipa::path(
    get,
    path = "/console/attendance/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "History, newest first; empty when it could not be loaded", body = AttendanceHistoryResponse)
    ),
    tag = "Attendance"
)]
pub async fn employee_history(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let data = state.attendance.load_employee_detail(employee_id).await;

    Ok(HttpResponse::Ok().json(AttendanceHistoryResponse { employee_id, data }))
}
