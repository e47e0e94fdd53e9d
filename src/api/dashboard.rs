use actix_web::{HttpResponse, Responder, web};

use crate::services::load_dashboard;
use crate::state::AppState;

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/console/dashboard",
    responses(
        (status = 200, description = "Summary counters with present rate", body = DashboardStats),
        (status = 502, description = "Summary could not be loaded", body = Object, example = json!({
            "message": "Failed to load dashboard summary."
        }))
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let stats = load_dashboard(state.api.as_ref(), &state.notifier).await?;
    Ok(HttpResponse::Ok().json(stats))
}
