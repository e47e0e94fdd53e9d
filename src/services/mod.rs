pub mod aggregator;
pub mod dashboard;
pub mod directory;
pub mod notifications;

pub use aggregator::{AttendanceBoard, AttendanceFilter, AttendanceTally, compute_filtered_view, load_all_attendance};
pub use dashboard::load_dashboard;
pub use directory::{EmployeeDirectory, EmployeeFilter};
pub use notifications::NotificationQueue;
