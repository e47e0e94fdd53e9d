#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use hrm_console::client::{ApiError, ApiResult, HrmsApi};
use hrm_console::model::{
    AttendanceStatus, DashboardSummary, Employee, MarkAttendance, NewEmployee, RawAttendance,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn employee(id: u64, name: &str) -> Employee {
    Employee {
        id,
        employee_code: format!("EMP-{id:03}"),
        full_name: name.to_string(),
        email: format!("{}@corp.io", name.to_lowercase().replace(' ', ".")),
        department: "Engineering".to_string(),
    }
}

pub fn entry(id: Option<u64>, day: &str, status: AttendanceStatus) -> RawAttendance {
    RawAttendance {
        id,
        employee_id: None,
        date: date(day),
        status,
    }
}

pub fn rejected(status: u16, body: Value) -> ApiError {
    ApiError::Status {
        status,
        body: Some(body),
    }
}

#[derive(Default)]
pub struct Calls {
    pub list_employees: AtomicUsize,
    pub create_employee: AtomicUsize,
    pub delete_employee: AtomicUsize,
    pub list_attendance: AtomicUsize,
    pub mark_attendance: AtomicUsize,
    pub dashboard_summary: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        [
            &self.list_employees,
            &self.create_employee,
            &self.delete_employee,
            &self.list_attendance,
            &self.mark_attendance,
            &self.dashboard_summary,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

/// In-memory stand-in for the HRM backend.
#[derive(Default)]
pub struct StubApi {
    pub employees: Mutex<Vec<Employee>>,
    pub attendance: Mutex<HashMap<u64, Vec<RawAttendance>>>,
    pub summary: Mutex<Option<DashboardSummary>>,
    pub fail_employees: Mutex<bool>,
    pub fail_attendance_for: Mutex<HashSet<u64>>,
    pub reject_create: Mutex<Option<ApiError>>,
    pub reject_delete: Mutex<Option<ApiError>>,
    pub reject_mark: Mutex<Option<ApiError>>,
    /// When set, attendance lists are read first and only returned once a
    /// permit is available.
    pub attendance_gate: Mutex<Option<Arc<Semaphore>>>,
    /// Per-employee variant of `attendance_gate`.
    pub employee_gates: Mutex<HashMap<u64, Arc<Semaphore>>>,
    /// Employee ids in the order their attendance answers were produced.
    pub answered: Mutex<Vec<u64>>,
    /// When set, marks wait for a permit before answering.
    pub mark_gate: Mutex<Option<Arc<Semaphore>>>,
    pub next_id: AtomicUsize,
    pub calls: Calls,
}

impl StubApi {
    pub fn with_roster(employees: Vec<Employee>) -> Self {
        let stub = Self::default();
        *stub.employees.lock() = employees;
        stub.next_id.store(1000, Ordering::SeqCst);
        stub
    }

    pub fn set_attendance(&self, employee_id: u64, entries: Vec<RawAttendance>) {
        self.attendance.lock().insert(employee_id, entries);
    }

    pub fn fail_attendance(&self, employee_id: u64) {
        self.fail_attendance_for.lock().insert(employee_id);
    }

    pub fn gate_employee(&self, employee_id: u64) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.employee_gates.lock().insert(employee_id, gate.clone());
        gate
    }

    pub fn calls(&self, counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn unavailable() -> ApiError {
        rejected(503, json!({ "detail": "Service unavailable" }))
    }
}

#[async_trait]
impl HrmsApi for StubApi {
    async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        self.calls.list_employees.fetch_add(1, Ordering::SeqCst);
        if *self.fail_employees.lock() {
            return Err(Self::unavailable());
        }
        Ok(self.employees.lock().clone())
    }

    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<()> {
        self.calls.create_employee.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.reject_create.lock().clone() {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        self.employees.lock().push(Employee {
            id,
            employee_code: employee.employee_code.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
        });
        Ok(())
    }

    async fn delete_employee(&self, id: u64) -> ApiResult<()> {
        self.calls.delete_employee.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.reject_delete.lock().clone() {
            return Err(err);
        }
        self.employees.lock().retain(|e| e.id != id);
        Ok(())
    }

    async fn list_attendance(&self, employee_id: u64) -> ApiResult<Vec<RawAttendance>> {
        self.calls.list_attendance.fetch_add(1, Ordering::SeqCst);
        let failing = self.fail_attendance_for.lock().contains(&employee_id);
        let snapshot = self.attendance.lock().get(&employee_id).cloned().unwrap_or_default();

        let gates = [
            self.attendance_gate.lock().clone(),
            self.employee_gates.lock().get(&employee_id).cloned(),
        ];
        for gate in gates.into_iter().flatten() {
            let _permit = gate.acquire().await.map_err(|e| ApiError::Network(e.to_string()))?;
        }

        self.answered.lock().push(employee_id);
        if failing {
            return Err(ApiError::Network(format!("attendance of {employee_id} unavailable")));
        }
        Ok(snapshot)
    }

    async fn mark_attendance(&self, mark: &MarkAttendance) -> ApiResult<Option<RawAttendance>> {
        self.calls.mark_attendance.fetch_add(1, Ordering::SeqCst);

        let gate = self.mark_gate.lock().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.map_err(|e| ApiError::Network(e.to_string()))?;
        }

        if let Some(err) = self.reject_mark.lock().clone() {
            return Err(err);
        }

        let created = RawAttendance {
            id: Some(self.next_id.fetch_add(1, Ordering::SeqCst) as u64),
            employee_id: Some(mark.employee_id),
            date: mark.date,
            status: mark.status,
        };
        let mut attendance = self.attendance.lock();
        let entries = attendance.entry(mark.employee_id).or_default();
        entries.retain(|e| e.date != mark.date);
        entries.push(created.clone());
        Ok(Some(created))
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        self.calls.dashboard_summary.fetch_add(1, Ordering::SeqCst);
        (*self.summary.lock()).ok_or_else(Self::unavailable)
    }
}
