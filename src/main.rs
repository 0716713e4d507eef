use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::time::Duration;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod seed;
mod utils;

#[cfg(test)]
mod test_support;

use config::{AuthMode, Config};
use db::init_db;

use crate::docs::ApiDoc;
use crate::routes::Limiters;
use crate::utils::login_id_filter::LoginIdFilter;
use crate::utils::session_cache::SessionCache;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Dayflow HRM"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, mode = %config.auth_mode, "Server starting...");
    if config.auth_mode == AuthMode::Demo {
        warn!("AUTH_MODE=demo: accounts without a password accept any 6+ character secret");
    }

    let db = Data::new(init_db(seed::demo_seed()?));

    let filter = LoginIdFilter::new();
    let warmed = filter.warmup(db.login_ids());
    info!(login_ids = warmed, "Login ID filter ready");
    let filter = Data::new(filter);

    let sessions = Data::new(SessionCache::new(Duration::from_secs(
        config.session_ttl as u64,
    )));
    let limiters = Limiters::from_config(&config)?;

    let server_addr = config.server_addr.clone();
    let config_data = Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(db.clone())
            .app_data(config_data.clone())
            .app_data(sessions.clone())
            .app_data(filter.clone())
            .service(index)
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, &config, &limiters))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
