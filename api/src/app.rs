//! Application factory
//!
//! Builds the actix-web application from shared state so the binary and the
//! integration tests serve exactly the same routes and middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::token::TokenCodec;
use cf_shared::config::AppConfig;
use cf_shared::errors::{error_codes, ErrorResponse};
use cf_shared::types::{HealthResponse, HealthStatus};

use crate::handlers::error::{json_error_handler, ErrorResponseExt};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{login::login, logout::logout, profile, register::register, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, S, T>(
    app_state: web::Data<AppState<U, S, T>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    let auth = JwtAuth::new(app_state.authenticator.clone());

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, S, T>))
                    .route("/login", web::post().to(login::<U, S, T>))
                    .route(
                        "/logout",
                        web::post().to(logout::<U, S, T>).wrap(auth.clone()),
                    )
                    .route(
                        "/me",
                        web::get().to(profile::me::<U, S, T>).wrap(auth.clone()),
                    )
                    .route(
                        "/profile",
                        web::put()
                            .to(profile::update_profile::<U, S, T>)
                            .wrap(auth),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        service: "cashflow-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "Route not found").to_response(StatusCode::NOT_FOUND)
}
