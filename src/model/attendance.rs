use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

use super::employee::Employee;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
    ToSchema,
)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

/// Attendance entry exactly as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendance {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub employee_id: Option<u64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Display key of a merged record. Backend ids are kept as-is; entries without
/// one get a local key built from `employee_id-date-position` that is never
/// sent back to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(untagged)]
pub enum RecordKey {
    Remote(u64),
    Local(String),
}

impl RecordKey {
    pub fn synthetic(employee_id: u64, date: NaiveDate, position: usize) -> Self {
        RecordKey::Local(format!("{employee_id}-{date}-{position}"))
    }
}

/// Denormalized attendance row used by the attendance views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(value_type = String, example = "7-2026-02-20-0")]
    pub id: RecordKey,
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "2026-02-20", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Merge one backend entry with the roster entry it belongs to.
    pub fn from_raw(raw: RawAttendance, employee_id: u64, employee_name: &str, position: usize) -> Self {
        let id = match raw.id {
            Some(id) => RecordKey::Remote(id),
            None => RecordKey::synthetic(employee_id, raw.date, position),
        };

        Self {
            id,
            employee_id,
            employee_name: employee_name.to_string(),
            date: raw.date,
            status: raw.status,
        }
    }

    pub fn for_employee(raw: RawAttendance, employee: &Employee, position: usize) -> Self {
        Self::from_raw(raw, employee.id, &employee.full_name, position)
    }

    pub fn same_slot(&self, employee_id: u64, date: NaiveDate) -> bool {
        self.employee_id == employee_id && self.date == date
    }
}

/// Body of `POST /attendance/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendance {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
