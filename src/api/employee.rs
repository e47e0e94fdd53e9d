use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::model::{Employee, NewEmployee};
use crate::services::directory::{EMPLOYEE_ADDED, EMPLOYEE_REMOVED, departments, filter_employees};
use crate::services::EmployeeFilter;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    /// Employees matching the filter.
    pub data: Vec<Employee>,
    /// Size of the whole roster, before filtering.
    #[schema(example = 10)]
    pub total: usize,
    #[schema(example = json!(["Engineering", "Research"]))]
    pub departments: Vec<String>,
    /// Inline error of the employee form, if any.
    #[schema(example = "Failed to load employees.", nullable = true)]
    pub error: Option<String>,
}

/// List employees
///
/// Refetches the roster, then applies search and department filters. When the
/// refetch fails the previously loaded list is returned with `error` set.
#[utoipa::path(
    get,
    path = "/console/employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Filtered employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    state: web::Data<AppState>,
    query: web::Query<EmployeeFilter>,
) -> actix_web::Result<impl Responder> {
    // Failures are already recorded as the form error and a notification.
    let _ = state.directory.refresh().await;

    let employees = state.directory.employees();
    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: filter_employees(&employees, &query),
        total: employees.len(),
        departments: departments(&employees),
        error: state.directory.form_error(),
    }))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/console/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee added successfully."
        })),
        (status = 400, description = "Missing fields", body = Object, example = json!({
            "message": "Please fill in all fields before adding an employee."
        })),
        (status = 409, description = "A previous add is still pending"),
        (status = 502, description = "Backend rejected the employee", body = Object, example = json!({
            "message": "Failed to add employee."
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<NewEmployee>,
) -> actix_web::Result<impl Responder> {
    state.directory.create(&payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": EMPLOYEE_ADDED
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/console/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee removed."
        })),
        (status = 502, description = "Backend refused the delete", body = Object, example = json!({
            "message": "Failed to delete employee."
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    state.directory.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": EMPLOYEE_REMOVED
    })))
}
