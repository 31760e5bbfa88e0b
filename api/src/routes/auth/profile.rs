use actix_web::{web, HttpResponse};
use validator::Validate;

use cf_core::repositories::{SessionStore, UserRepository};
use cf_core::services::token::TokenCodec;
use cf_shared::types::ApiResponse;

use crate::dto::auth::UpdateProfileRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/me
pub async fn me<U, S, T>(state: web::Data<AppState<U, S, T>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
    T: TokenCodec + 'static,
{
    match state.auth_service.get_profile(auth.user_id).await {
        Ok(profile) => {
            HttpResponse::Ok().json(ApiResponse::success("Profile retrieved successfully", profile))
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/auth/profile
///
/// Changes the display name of the authenticated user.
pub async fn update_profile<U, S, T>(
    state: web::Data<AppState<U, S, T>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .update_profile(auth.user_id, &request.name)
        .await
    {
        Ok(profile) => {
            HttpResponse::Ok().json(ApiResponse::success("Profile updated successfully", profile))
        }
        Err(error) => handle_domain_error(&error),
    }
}
