//! Employee roster management: list, add, remove.
//!
//! The local list is never patched; every successful mutation is followed by
//! a full refetch.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use crate::client::HrmsApi;
use crate::client::message::{ADD_EMPLOYEE_FAILED, DELETE_EMPLOYEE_FAILED};
use crate::error::{ConsoleError, ConsoleResult};
use crate::model::{Employee, NewEmployee};
use crate::services::notifications::NotificationQueue;
use crate::utils::in_flight::InFlight;

pub const LOAD_FAILED: &str = "Failed to load employees.";
pub const FIELDS_REQUIRED: &str = "Please fill in all fields before adding an employee.";
pub const EMPLOYEE_ADDED: &str = "Employee added successfully.";
pub const EMPLOYEE_REMOVED: &str = "Employee removed.";

/// Search box and department dropdown of the employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    /// Case-insensitive match on employee code, name or email.
    #[serde(default)]
    pub search: String,
    /// Exact department; empty means all.
    #[serde(default)]
    pub department: String,
}

pub fn filter_employees(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Employee> {
    let query = filter.search.to_lowercase();
    employees
        .iter()
        .filter(|e| {
            let matches_search = query.is_empty()
                || e.employee_code.to_lowercase().contains(&query)
                || e.full_name.to_lowercase().contains(&query)
                || e.email.to_lowercase().contains(&query);
            let matches_department = filter.department.is_empty() || e.department == filter.department;
            matches_search && matches_department
        })
        .cloned()
        .collect()
}

/// Distinct non-empty departments, sorted.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    employees
        .iter()
        .filter(|e| !e.department.is_empty())
        .map(|e| e.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Default)]
struct DirectoryState {
    employees: Vec<Employee>,
    form_error: Option<String>,
}

pub struct EmployeeDirectory {
    api: Arc<dyn HrmsApi>,
    notifier: NotificationQueue,
    state: Mutex<DirectoryState>,
    submitting: InFlight,
    deleting: InFlight,
}

impl EmployeeDirectory {
    pub fn new(api: Arc<dyn HrmsApi>, notifier: NotificationQueue) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(DirectoryState::default()),
            submitting: InFlight::new("add employee"),
            deleting: InFlight::new("delete employee"),
        }
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.state.lock().employees.clone()
    }

    pub fn form_error(&self) -> Option<String> {
        self.state.lock().form_error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_active()
    }

    /// Refetch the roster. On failure the previous list stays in place and
    /// the error is shown once.
    pub async fn refresh(&self) -> ConsoleResult<Vec<Employee>> {
        self.state.lock().form_error = None;

        match self.api.list_employees().await {
            Ok(employees) => {
                info!(count = employees.len(), "Employees loaded");
                self.state.lock().employees = employees.clone();
                Ok(employees)
            }
            Err(e) => {
                error!(error = %e, "Failed to load employees");
                self.fail(LOAD_FAILED);
                Err(ConsoleError::Transport {
                    status: e.status(),
                    message: LOAD_FAILED.to_string(),
                })
            }
        }
    }

    /// Add an employee. All four fields are required; values are trimmed
    /// before being sent.
    pub async fn create(&self, form: &NewEmployee) -> ConsoleResult<()> {
        if !form.is_complete() {
            self.state.lock().form_error = Some(FIELDS_REQUIRED.to_string());
            return Err(ConsoleError::validation(FIELDS_REQUIRED));
        }

        let _submitting = self.submitting.begin()?;
        self.state.lock().form_error = None;

        let employee = form.trimmed();
        if let Err(e) = self.api.create_employee(&employee).await {
            warn!(employee_code = %employee.employee_code, error = %e, "Failed to add employee");
            let err = ConsoleError::transport(&e, ADD_EMPLOYEE_FAILED);
            self.fail(&err.to_string());
            return Err(err);
        }

        info!(employee_code = %employee.employee_code, "Employee added");
        // The add itself went through; a failed reload reports on its own.
        let _ = self.refresh().await;
        self.notifier.success(EMPLOYEE_ADDED);
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> ConsoleResult<()> {
        let _deleting = self.deleting.begin()?;

        if let Err(e) = self.api.delete_employee(id).await {
            warn!(employee_id = id, error = %e, "Failed to delete employee");
            let err = ConsoleError::transport(&e, DELETE_EMPLOYEE_FAILED);
            self.fail(&err.to_string());
            return Err(err);
        }

        info!(employee_id = id, "Employee removed");
        let _ = self.refresh().await;
        self.notifier.success(EMPLOYEE_REMOVED);
        Ok(())
    }

    fn fail(&self, message: &str) {
        self.state.lock().form_error = Some(message.to_string());
        self.notifier.error(message);
    }
}
