use actix_web::{web, HttpResponse};
use validator::Validate;

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::token::TokenCodec;
use cf_shared::types::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account and returns its first session token.
///
/// # Request Body
///
/// ```json
/// { "email": "ana@example.com", "password": "secret123", "name": "Ana" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "User registered successfully",
///     "data": { "access_token": "...", "user": { "id": "...", "email": "...", "name": "..." } },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body or field constraints
/// - 409 Conflict: Email already exists
/// - 500 Internal Server Error: Store or hashing failure
pub async fn register<U, S, T>(
    state: web::Data<AppState<U, S, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::debug!("Registration request failed validation");
        return validation_error_response(&errors);
    }

    let RegisterRequest {
        email,
        password,
        name,
    } = request.into_inner();

    match state.auth_service.register(&email, &password, &name).await {
        Ok(result) => HttpResponse::Created().json(ApiResponse::success("User registered successfully", result)),
        Err(error) => handle_domain_error(&error),
    }
}
