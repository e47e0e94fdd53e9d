use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Backend-computed counters from `GET /dashboard/summary`.
///
/// The values are not cross-checked against the employee or attendance
/// caches; the backend may count data the console never fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub present_today: u64,
    #[serde(default)]
    pub absent_today: u64,
}

impl DashboardSummary {
    /// Percentage of employees present today, rounded half up. Zero when
    /// there are no employees.
    pub fn present_rate(&self) -> u64 {
        present_rate(self.present_today, self.total_employees)
    }
}

pub fn present_rate(present: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    // round(100 * present / total), widened so backend counters cannot overflow
    let (present, total) = (u128::from(present), u128::from(total));
    let rate = (200 * present + total) / (2 * total);
    u64::try_from(rate).unwrap_or(u64::MAX)
}

/// Dashboard view: summary counters plus the derived rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 4)]
    pub total_employees: u64,
    #[schema(example = 3)]
    pub present_today: u64,
    #[schema(example = 1)]
    pub absent_today: u64,
    #[schema(example = 75)]
    pub present_rate: u64,
}

impl From<DashboardSummary> for DashboardStats {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_employees: summary.total_employees,
            present_today: summary.present_today,
            absent_today: summary.absent_today,
            present_rate: summary.present_rate(),
        }
    }
}
