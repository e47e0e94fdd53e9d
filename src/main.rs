use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hrm_console::client::HttpHrmsApi;
use hrm_console::config::Config;
use hrm_console::docs::ApiDoc;
use hrm_console::routes;
use hrm_console::state::AppState;

#[get("/")]
async fn index() -> impl Responder {
    "HRM console is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.hrms_api_url, "Console starting...");

    let api = HttpHrmsApi::new(&config.hrms_api_url, config.http_timeout)
        .context("Failed to create HRM API client")?;
    let state = Data::new(AppState::from_config(Arc::new(api), &config));

    let server_addr = config.server_addr.clone();
    let route_config = config.clone();
    let app_state = state.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard needed for the JS/CSS assets
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(app_state.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &route_config))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    info!("Console stopped, cancelling pending notifications");
    state.notifier.shutdown();

    Ok(())
}
