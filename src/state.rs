use std::sync::Arc;

use crate::client::HrmsApi;
use crate::config::Config;
use crate::services::{AttendanceBoard, EmployeeDirectory, NotificationQueue};

/// Everything the handlers share. Each view keeps its own cache; only the
/// notification queue is common to all of them.
pub struct AppState {
    pub api: Arc<dyn HrmsApi>,
    pub notifier: NotificationQueue,
    pub directory: EmployeeDirectory,
    pub attendance: AttendanceBoard,
}

impl AppState {
    pub fn new(api: Arc<dyn HrmsApi>, notifier: NotificationQueue, attendance_fetch_concurrency: usize) -> Self {
        Self {
            directory: EmployeeDirectory::new(api.clone(), notifier.clone()),
            attendance: AttendanceBoard::new(api.clone(), notifier.clone(), attendance_fetch_concurrency),
            api,
            notifier,
        }
    }

    pub fn from_config(api: Arc<dyn HrmsApi>, config: &Config) -> Self {
        Self::new(
            api,
            NotificationQueue::new(config.toast_duration_ms),
            config.attendance_fetch_concurrency,
        )
    }
}
