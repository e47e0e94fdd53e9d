mod support;

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web::Data};
use serde_json::{Value, json};
use utoipa::OpenApi;
use utoipa::openapi::PathItemType;

use hrm_console::config::Config;
use hrm_console::docs::ApiDoc;
use hrm_console::model::{AttendanceStatus, DashboardSummary};
use hrm_console::routes;
use hrm_console::services::NotificationQueue;
use hrm_console::state::AppState;

use support::{StubApi, employee, entry, rejected};

fn config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        hrms_api_url: "http://backend.invalid".into(),
        api_prefix: "/console".into(),
        http_timeout: None,
        attendance_fetch_concurrency: 2,
        toast_duration_ms: 0,
        log_dir: "logs".into(),
    }
}

fn seeded_stub() -> Arc<StubApi> {
    let stub = StubApi::with_roster(vec![employee(1, "Ada Lovelace"), employee(2, "Grace Hopper")]);
    stub.set_attendance(
        1,
        vec![
            entry(Some(1), "2026-02-19", AttendanceStatus::Present),
            entry(Some(2), "2026-02-20", AttendanceStatus::Absent),
        ],
    );
    stub.set_attendance(2, vec![entry(None, "2026-02-20", AttendanceStatus::Present)]);
    *stub.summary.lock() = Some(DashboardSummary {
        total_employees: 2,
        present_today: 1,
        absent_today: 1,
    });
    Arc::new(stub)
}

fn state_for(stub: Arc<StubApi>) -> Data<AppState> {
    Data::new(AppState::new(stub, NotificationQueue::new(0), 2))
}

macro_rules! console_app {
    ($state:expr) => {{
        let config = config();
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(move |cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

#[actix_web::test]
async fn dashboard_reports_rate() {
    let state = state_for(seeded_stub());
    let app = console_app!(state);

    let req = test::TestRequest::get().uri("/console/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total_employees"], 2);
    assert_eq!(body["present_rate"], 50);
}

#[actix_web::test]
async fn dashboard_failure_is_bad_gateway() {
    let stub = seeded_stub();
    *stub.summary.lock() = None;
    let state = state_for(stub);
    let app = console_app!(state);

    let req = test::TestRequest::get().uri("/console/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Failed to load dashboard summary.");
    assert_eq!(state.notifier.len(), 1);
}

#[actix_web::test]
async fn employee_list_is_filtered() {
    let state = state_for(seeded_stub());
    let app = console_app!(state);

    let req = test::TestRequest::get()
        .uri("/console/employees?search=grace&department=Engineering")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["employee_id"], "EMP-002");
    assert_eq!(body["departments"], json!(["Engineering"]));
    assert_eq!(body["error"], Value::Null);
}

#[actix_web::test]
async fn incomplete_employee_is_bad_request() {
    let stub = seeded_stub();
    let state = state_for(stub.clone());
    let app = console_app!(state);

    let req = test::TestRequest::post()
        .uri("/console/employees")
        .set_json(json!({ "employee_id": "EMP-9", "full_name": "", "email": "x@y.z", "department": "Ops" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stub.calls(&stub.calls.create_employee), 0);
}

#[actix_web::test]
async fn add_then_delete_employee() {
    let stub = seeded_stub();
    let state = state_for(stub.clone());
    let app = console_app!(state);

    let req = test::TestRequest::post()
        .uri("/console/employees")
        .set_json(json!({
            "employee_id": "EMP-003",
            "full_name": "Linus Torvalds",
            "email": "linus@corp.io",
            "department": "Kernel"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(state.directory.employees().len(), 3);

    let req = test::TestRequest::delete().uri("/console/employees/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.directory.employees().len(), 2);

    let messages: Vec<_> = state.notifier.snapshot().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Employee added successfully.", "Employee removed."]);
}

#[actix_web::test]
async fn attendance_refresh_then_filter() {
    let stub = seeded_stub();
    stub.fail_attendance(2);
    let state = state_for(stub);
    let app = console_app!(state);

    let req = test::TestRequest::post().uri("/console/attendance/refresh").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "employees": 2, "records": 2 }));

    let req = test::TestRequest::get()
        .uri("/console/attendance?query=&status=Absent&date=")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["employee_name"], "Ada Lovelace");
    assert_eq!(body["counts"], json!({ "total": 1, "present": 0, "absent": 1 }));
    assert_eq!(body["employees"].as_array().unwrap().len(), 2);
    assert_eq!(body["loading"], false);
    // Absorbed fetch failures are not surfaced.
    assert!(state.notifier.is_empty());
}

#[actix_web::test]
async fn mark_attendance_flow() {
    let stub = seeded_stub();
    let state = state_for(stub.clone());
    let app = console_app!(state);

    let req = test::TestRequest::post().uri("/console/attendance/refresh").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/console/attendance")
        .set_json(json!({ "employee_id": 1, "date": "2026-02-20", "status": "Present" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: Value = test::read_body_json(resp).await;
    assert_eq!(record["status"], "Present");

    let req = test::TestRequest::get().uri("/console/attendance?date=2026-02-20").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["counts"], json!({ "total": 2, "present": 2, "absent": 0 }));

    let req = test::TestRequest::post()
        .uri("/console/attendance")
        .set_json(json!({ "employee_id": null, "date": "", "status": "Absent" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please select an employee.");
}

#[actix_web::test]
async fn mark_rejection_is_bad_gateway_with_backend_text() {
    let stub = seeded_stub();
    *stub.reject_mark.lock() = Some(rejected(400, json!({ "detail": "Attendance already marked for this date" })));
    let state = state_for(stub);
    let app = console_app!(state);
    state.attendance.load_roster().await;

    let req = test::TestRequest::post()
        .uri("/console/attendance")
        .set_json(json!({ "employee_id": 2, "date": "2026-02-20", "status": "Absent" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Attendance already marked for this date");
}

#[actix_web::test]
async fn history_is_newest_first() {
    let state = state_for(seeded_stub());
    let app = console_app!(state);
    state.attendance.load_roster().await;

    let req = test::TestRequest::get().uri("/console/attendance/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["employee_id"], 1);
    assert_eq!(body["data"][0]["date"], "2026-02-20");
    assert_eq!(body["data"][1]["date"], "2026-02-19");
    assert_eq!(body["data"][0]["employee_name"], "Ada Lovelace");
}

#[actix_web::test]
async fn notifications_can_be_listed_and_dismissed() {
    let state = state_for(seeded_stub());
    let app = console_app!(state);
    let id = state.notifier.info("Welcome back.");

    let req = test::TestRequest::get().uri("/console/notifications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["id"], id.as_str());
    assert_eq!(body[0]["kind"], "info");

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/console/notifications/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
    assert!(state.notifier.is_empty());
}

#[actix_web::test]
async fn documented_paths_match_registered_routes() {
    let state = state_for(seeded_stub());
    let app = console_app!(state);

    for (path, item) in ApiDoc::openapi().paths.paths {
        let uri = path.replace("{employee_id}", "1").replace("{id}", "unknown");
        for operation in item.operations.keys() {
            let method = match operation {
                PathItemType::Get => Method::GET,
                PathItemType::Post => Method::POST,
                PathItemType::Delete => Method::DELETE,
                other => panic!("undocumented method {other:?} on {path}"),
            };
            let req = test::TestRequest::default().method(method.clone()).uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;

            assert_ne!(resp.status(), StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(resp.request().match_pattern().as_deref(), Some(path.as_str()), "{method} {uri}");
        }
    }
}
