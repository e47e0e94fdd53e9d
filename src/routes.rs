use crate::{
    api::{attendance, dashboard, employee, notification},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(web::resource("/dashboard").route(web::get().to(dashboard::get_dashboard)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{employee_id}
                    .service(web::resource("/{employee_id}").route(web::delete().to(employee::delete_employee))),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::mark_attendance)),
                    )
                    // /attendance/refresh
                    .service(web::resource("/refresh").route(web::post().to(attendance::refresh_attendance)))
                    // /attendance/{employee_id}
                    .service(web::resource("/{employee_id}").route(web::get().to(attendance::employee_history))),
            )
            .service(
                web::scope("/notifications")
                    .service(web::resource("").route(web::get().to(notification::list_notifications)))
                    .service(
                        web::resource("/{id}").route(web::delete().to(notification::dismiss_notification)),
                    ),
            ),
    );
}

// UI VIEW MOUNT
//  ├─ GET  /employees            (roster refetch + filter)
//  └─ POST /attendance/refresh   (roster + per-employee fan-out)

// FILTER CHANGE
//  └─ GET  /attendance?query&status&date   (cache only)

// MUTATION
//  ├─ POST/DELETE ...            (in-flight guarded)
//  └─ toast -> GET /notifications, expires or DELETE /notifications/{id}
