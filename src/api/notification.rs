use actix_web::{HttpResponse, Responder, web};

use crate::model::NotificationId;
use crate::state::AppState;

/// Live notifications
#[utoipa::path(
    get,
    path = "/console/notifications",
    responses(
        (status = 200, description = "Live notifications, oldest first", body = [Notification])
    ),
    tag = "Notification"
)]
pub async fn list_notifications(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.notifier.snapshot())
}

/// Dismiss a notification
///
/// Unknown or already retired ids are accepted as well.
#[utoipa::path(
    delete,
    path = "/console/notifications/{id}",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification is no longer live")
    ),
    tag = "Notification"
)]
pub async fn dismiss_notification(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    state.notifier.dismiss(&NotificationId::from(path.into_inner()));
    HttpResponse::NoContent().finish()
}
