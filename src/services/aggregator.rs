//! Attendance across the whole roster.
//!
//! The backend only serves attendance per employee, so the board fans out one
//! request per employee and merges the answers into a flat list. A failed
//! request contributes nothing for that employee and is only logged; partial
//! data is preferred over no data.
//!
//! The cache is replaced wholesale by every refresh. A mark that completes
//! while a refresh started earlier is still running can be overwritten by
//! that refresh; the next refresh brings it back from the backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::client::HrmsApi;
use crate::client::message::MARK_ATTENDANCE_FAILED;
use crate::error::{ConsoleError, ConsoleResult};
use crate::model::{AttendanceRecord, AttendanceStatus, Employee, MarkAttendance, RecordKey};
use crate::services::notifications::NotificationQueue;
use crate::utils::form::blank_as_none;
use crate::utils::in_flight::InFlight;

pub const SELECT_EMPLOYEE: &str = "Please select an employee.";
pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found.";
pub const ATTENDANCE_MARKED: &str = "Attendance marked successfully.";
pub const DETAIL_LOAD_FAILED: &str = "Could not load attendance records.";

/// Fetch every employee's attendance and merge it into one list.
///
/// At most `concurrency` requests are in flight at once. Records of one
/// employee keep the backend's order and the employees keep roster order.
/// An empty roster returns immediately without touching the network.
pub async fn load_all_attendance(
    api: &dyn HrmsApi,
    employees: &[Employee],
    concurrency: usize,
) -> Vec<AttendanceRecord> {
    if employees.is_empty() {
        return Vec::new();
    }

    let slices: Vec<Vec<AttendanceRecord>> = stream::iter(employees.iter().cloned())
        .map(|employee| async move { employee_slice(api, &employee).await })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    slices.into_iter().flatten().collect()
}

async fn employee_slice(api: &dyn HrmsApi, employee: &Employee) -> Vec<AttendanceRecord> {
    match api.list_attendance(employee.id).await {
        Ok(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(position, raw)| AttendanceRecord::for_employee(raw, employee, position))
            .collect(),
        Err(e) => {
            warn!(employee_id = employee.id, error = %e, "Skipping attendance of employee");
            Vec::new()
        }
    }
}

/// Filter criteria of the attendance list. Unset criteria match everything.
///
/// Blank `status` or `date` values coming from the UI count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Case-insensitive match on employee name, or substring of the date.
    #[serde(default, alias = "search")]
    pub query: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[param(value_type = Option<String>, example = "Present")]
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[param(value_type = Option<String>, format = "date", example = "2026-02-20")]
    pub date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.matches_query(record)
            && self.status.is_none_or(|status| record.status == status)
            && self.date.is_none_or(|date| record.date == date)
    }

    fn matches_query(&self, record: &AttendanceRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        record
            .employee_name
            .to_lowercase()
            .contains(&self.query.to_lowercase())
            || record.date.to_string().contains(&self.query)
    }
}

/// Records matching every criterion of `filter`, in cache order.
pub fn compute_filtered_view(records: &[AttendanceRecord], filter: &AttendanceFilter) -> Vec<AttendanceRecord> {
    records.iter().filter(|r| filter.matches(r)).cloned().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceTally {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

pub fn tally(records: &[AttendanceRecord]) -> AttendanceTally {
    records.iter().fold(
        AttendanceTally {
            total: records.len(),
            ..Default::default()
        },
        |mut acc, record| {
            match record.status {
                AttendanceStatus::Present => acc.present += 1,
                AttendanceStatus::Absent => acc.absent += 1,
            }
            acc
        },
    )
}

/// Put `record` into `records`, replacing any entry for the same employee and
/// date.
pub fn merge_marked(records: &mut Vec<AttendanceRecord>, record: AttendanceRecord) {
    records.retain(|r| !r.same_slot(record.employee_id, record.date));
    records.push(record);
}

/// Mark-attendance form as submitted by the UI. The date defaults to today
/// and the status to `Present`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct MarkAttendanceForm {
    pub employee_id: Option<u64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[schema(example = "2026-02-20", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: AttendanceStatus,
}

#[derive(Default)]
struct BoardState {
    roster: Vec<Employee>,
    records: Vec<AttendanceRecord>,
    mark_error: Option<String>,
}

/// Decrements the loading counter when the refresh finishes.
struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Loading(counter)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// State behind the attendance view: roster, merged records and the mark
/// form error.
pub struct AttendanceBoard {
    api: Arc<dyn HrmsApi>,
    notifier: NotificationQueue,
    concurrency: usize,
    state: Mutex<BoardState>,
    loading: AtomicUsize,
    marking: InFlight,
}

impl AttendanceBoard {
    pub fn new(api: Arc<dyn HrmsApi>, notifier: NotificationQueue, concurrency: usize) -> Self {
        Self {
            api,
            notifier,
            concurrency: concurrency.max(1),
            state: Mutex::new(BoardState::default()),
            loading: AtomicUsize::new(0),
            marking: InFlight::new("mark attendance"),
        }
    }

    pub fn roster(&self) -> Vec<Employee> {
        self.state.lock().roster.clone()
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.state.lock().records.clone()
    }

    pub fn mark_error(&self) -> Option<String> {
        self.state.lock().mark_error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire) > 0
    }

    pub fn is_marking(&self) -> bool {
        self.marking.is_active()
    }

    pub fn replace_roster(&self, employees: Vec<Employee>) {
        self.state.lock().roster = employees;
    }

    /// Fetch the roster. A failed fetch leaves an empty roster; the view
    /// then simply has nobody to show.
    pub async fn load_roster(&self) -> Vec<Employee> {
        let roster = match self.api.list_employees().await {
            Ok(employees) => employees,
            Err(e) => {
                warn!(error = %e, "Failed to load roster for attendance");
                Vec::new()
            }
        };
        self.replace_roster(roster.clone());
        roster
    }

    /// Rebuild the record cache from the current roster.
    pub async fn refresh_records(&self) -> Vec<AttendanceRecord> {
        let _loading = Loading::start(&self.loading);
        let roster = self.roster();

        let records = load_all_attendance(self.api.as_ref(), &roster, self.concurrency).await;
        info!(employees = roster.len(), records = records.len(), "Attendance refreshed");

        self.state.lock().records = records.clone();
        records
    }

    /// Reload the roster, then every employee's attendance.
    pub async fn refresh(&self) -> Vec<AttendanceRecord> {
        self.load_roster().await;
        self.refresh_records().await
    }

    /// Current cache filtered by `filter`, with tallies over the result.
    pub fn view(&self, filter: &AttendanceFilter) -> (Vec<AttendanceRecord>, AttendanceTally) {
        let filtered = compute_filtered_view(&self.state.lock().records, filter);
        let counts = tally(&filtered);
        (filtered, counts)
    }

    /// Validate the form and mark attendance.
    pub async fn submit_mark(&self, form: MarkAttendanceForm, today: NaiveDate) -> ConsoleResult<AttendanceRecord> {
        let Some(employee_id) = form.employee_id else {
            return Err(self.reject(SELECT_EMPLOYEE));
        };
        self.mark_attendance(employee_id, form.date.unwrap_or(today), form.status)
            .await
    }

    /// Record `status` for `employee_id` on `date`.
    ///
    /// Unknown employees are rejected without contacting the backend. On
    /// success the local cache gets the new record in place of any previous
    /// one for the same day.
    pub async fn mark_attendance(
        &self,
        employee_id: u64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> ConsoleResult<AttendanceRecord> {
        let employee = self
            .state
            .lock()
            .roster
            .iter()
            .find(|e| e.id == employee_id)
            .cloned();
        let Some(employee) = employee else {
            debug!(employee_id, "Mark attendance for unknown employee");
            return Err(self.reject(EMPLOYEE_NOT_FOUND));
        };

        let _marking = self.marking.begin()?;
        self.state.lock().mark_error = None;

        let request = MarkAttendance {
            employee_id,
            date,
            status,
        };

        match self.api.mark_attendance(&request).await {
            Ok(created) => {
                let id = created
                    .and_then(|raw| raw.id)
                    .map(RecordKey::Remote)
                    .unwrap_or_else(|| RecordKey::synthetic(employee_id, date, 0));
                let record = AttendanceRecord {
                    id,
                    employee_id,
                    employee_name: employee.full_name.clone(),
                    date,
                    status,
                };

                merge_marked(&mut self.state.lock().records, record.clone());
                info!(employee_id, %date, %status, "Attendance marked");
                self.notifier.success(ATTENDANCE_MARKED);
                Ok(record)
            }
            Err(e) => {
                let err = ConsoleError::transport(&e, MARK_ATTENDANCE_FAILED);
                warn!(employee_id, %date, error = %e, "Failed to mark attendance");
                self.state.lock().mark_error = Some(err.to_string());
                self.notifier.error(err.to_string());
                Err(err)
            }
        }
    }

    fn reject(&self, message: &str) -> ConsoleError {
        self.state.lock().mark_error = Some(message.to_string());
        ConsoleError::validation(message)
    }

    /// Full history of one employee, newest first, fetched independently of
    /// the cache. Failures raise an error notification and give an empty
    /// list. Employees missing from the roster are not looked up at all.
    pub async fn load_employee_detail(&self, employee_id: u64) -> Vec<AttendanceRecord> {
        let name = self
            .state
            .lock()
            .roster
            .iter()
            .find(|e| e.id == employee_id)
            .map(|e| e.full_name.clone());
        let Some(name) = name else {
            debug!(employee_id, "History requested for unknown employee");
            return Vec::new();
        };

        match self.api.list_attendance(employee_id).await {
            Ok(entries) => {
                let mut records: Vec<AttendanceRecord> = entries
                    .into_iter()
                    .enumerate()
                    .map(|(position, raw)| AttendanceRecord::from_raw(raw, employee_id, &name, position))
                    .collect();
                records.sort_by(|a, b| b.date.cmp(&a.date));
                records
            }
            Err(e) => {
                warn!(employee_id, error = %e, "Failed to load attendance history");
                self.notifier.error(DETAIL_LOAD_FAILED);
                Vec::new()
            }
        }
    }
}
