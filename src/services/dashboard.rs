use tracing::error;

use crate::client::HrmsApi;
use crate::error::{ConsoleError, ConsoleResult};
use crate::model::DashboardStats;
use crate::services::notifications::NotificationQueue;

pub const SUMMARY_FAILED: &str = "Failed to load dashboard summary.";

/// Fetch the summary counters and derive the present rate.
pub async fn load_dashboard(api: &dyn HrmsApi, notifier: &NotificationQueue) -> ConsoleResult<DashboardStats> {
    match api.dashboard_summary().await {
        Ok(summary) => Ok(summary.into()),
        Err(e) => {
            error!(error = %e, "Failed to load dashboard summary");
            notifier.error(SUMMARY_FAILED);
            Err(ConsoleError::Transport {
                status: e.status(),
                message: SUMMARY_FAILED.to_string(),
            })
        }
    }
}
