pub mod attendance;
pub mod employee;
pub mod notification;
pub mod summary;

pub use attendance::{AttendanceRecord, AttendanceStatus, MarkAttendance, RawAttendance, RecordKey};
pub use employee::{Employee, NewEmployee};
pub use notification::{Notification, NotificationId, ToastKind};
pub use summary::{DashboardStats, DashboardSummary};
