use crate::api::attendance::{AttendanceHistoryResponse, AttendanceListResponse};
use crate::api::employee::EmployeeListResponse;
use crate::model::{AttendanceRecord, AttendanceStatus, DashboardStats, Employee, NewEmployee, Notification, ToastKind};
use crate::services::AttendanceTally;
use crate::services::aggregator::MarkAttendanceForm;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Console API",
        version = "0.1.0",
        description = r#"
## HRM Admin Console

View-level endpoints behind the single-page HRM admin console. The HRM
backend (`/api/v1`) stays the source of truth; this service keeps short-lived
per-view caches and the toast queue.

### Views
- **Dashboard**: today's counters and present rate
- **Employees**: list, search, add, remove
- **Attendance**: roster-wide records with filters and counts, marking, per-employee history
- **Notifications**: live toasts and dismissal

### Errors
Failed actions answer `{ "message": ... }` with the same text the console
shows: `400` for local validation, `409` while the same action is still
pending, `502` when the backend call failed.
"#,
    ),
    paths(
        crate::api::dashboard::get_dashboard,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::refresh_attendance,
        crate::api::attendance::mark_attendance,
        crate::api::attendance::employee_history,

        crate::api::notification::list_notifications,
        crate::api::notification::dismiss_notification
    ),
    components(
        schemas(
            DashboardStats,
            Employee,
            NewEmployee,
            EmployeeListResponse,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceTally,
            AttendanceListResponse,
            AttendanceHistoryResponse,
            MarkAttendanceForm,
            Notification,
            ToastKind
        )
    ),
    tags(
        (name = "Dashboard", description = "Dashboard summary"),
        (name = "Employee", description = "Employee directory"),
        (name = "Attendance", description = "Attendance aggregation and marking"),
        (name = "Notification", description = "Toast notifications"),
    )
)]
pub struct ApiDoc;
