use actix_web::{web, HttpResponse};

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::token::TokenCodec;
use cf_shared::types::ApiResponse;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token this request was authenticated with. Other
/// sessions of the same user are untouched.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or already revoked token
/// - 500 Internal Server Error: Session store failure
pub async fn logout<U, S, T>(
    state: web::Data<AppState<U, S, T>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    match state.auth_service.logout(&auth.token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Logout successful")),
        Err(error) => handle_domain_error(&error),
    }
}
