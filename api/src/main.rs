use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use cf_api::app::create_app;
use cf_api::routes::auth::AppState;
use cf_api::telemetry::init_tracing;
use cf_core::services::password::CredentialHasher;
use cf_core::services::token::{TokenService, TokenServiceConfig};
use cf_infra::cache::{RedisClient, RedisSessionStore};
use cf_infra::database::{DatabasePool, PgUserRepository};
use cf_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting Cashflow API Server");

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the built-in development secret");
    }
    config.validate().map_err(anyhow::Error::msg)?;

    let database = DatabasePool::connect(config.database.clone())
        .await
        .context("connecting to Postgres")?;
    database
        .run_migrations()
        .await
        .context("running database migrations")?;
    info!("{}", database.get_statistics());

    let redis = RedisClient::connect(config.cache.clone())
        .await
        .context("connecting to Redis")?;

    let user_repository = Arc::new(PgUserRepository::new(
        database.get_pool().clone(),
        database.query_timeout(),
    ));
    let session_store = Arc::new(RedisSessionStore::new(redis));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from_jwt_config(
        &config.auth.jwt,
    )?)?);

    let app_state = web::Data::new(AppState::new(
        user_repository,
        session_store,
        token_service,
        CredentialHasher::from_config(&config.auth.password),
        &config.auth.session,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
