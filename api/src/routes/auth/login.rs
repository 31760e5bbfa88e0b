use actix_web::{web, HttpResponse};
use validator::Validate;

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::token::TokenCodec;
use cf_shared::types::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Checks the credentials and starts a new session. Sessions opened earlier
/// stay valid.
///
/// ## Errors
/// - 400 Bad Request: Invalid body or field constraints
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 500 Internal Server Error: Store failure
pub async fn login<U, S, T>(
    state: web::Data<AppState<U, S, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success("Login successful", result)),
        Err(error) => handle_domain_error(&error),
    }
}
