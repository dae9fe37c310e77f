use std::io;

use actix_web::{web, HttpServer};
use tg_api::{create_app, telemetry, AppState};
use tg_core::services::JwtAuth;
use tg_infra::{build_cache, load_config, StaticUser, StaticUserProvider};
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = load_config().map_err(|e| startup_error("Failed to load configuration", e))?;

    telemetry::init_tracing(&config.logging)
        .map_err(|e| startup_error("Failed to initialize tracing", e))?;

    info!(environment = %config.environment, "Starting TokenGuard API server");

    let cache = build_cache(&config.cache).await.map_err(|e| {
        error!("Cache backend unavailable: {}", e);
        startup_error("Failed to build cache", e)
    })?;

    let users = StaticUserProvider::from_env()
        .map_err(|e| startup_error("Failed to load demo users", e))?;

    let auth = JwtAuth::<StaticUser>::new(&config.jwt, cache).map_err(|e| {
        error!("Token engine misconfigured: {}", e);
        startup_error("Failed to configure token engine", e)
    })?;

    let state = web::Data::new(AppState::new(auth, users));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()).wrap(TracingLogger::default()))
        .bind(&bind_address)?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await
}
