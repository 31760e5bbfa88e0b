//! Translation of domain errors into HTTP responses
//!
//! The only place where a status code is chosen for a `DomainError`.
//! Internal causes are logged here and never reach the response body.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use cf_core::errors::{AuthError, DomainError, TokenError};
use cf_shared::errors::{error_codes, ErrorResponse};

/// Extension trait for turning an `ErrorResponse` into an actix response
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.as_str())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(TokenError::TokenGenerationFailed) => internal_error(error),
        DomainError::Token(token_error) => {
            tracing::debug!(reason = token_error.error_code(), "Request rejected by authorization gate");
            unauthorized_response()
        }
        DomainError::StoreUnavailable { .. }
        | DomainError::DeadlineExceeded { .. }
        | DomainError::Hashing { .. }
        | DomainError::Internal { .. } => internal_error(error),
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    let status = match error {
        AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
    };
    ErrorResponse::new(error.error_code(), error.to_string()).to_response(status)
}

fn internal_error(error: &DomainError) -> HttpResponse {
    tracing::error!(error = %error, "Request failed with internal error");
    ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
        .to_response(StatusCode::INTERNAL_SERVER_ERROR)
}

/// The single body used for every gate rejection
pub fn unauthorized_response() -> HttpResponse {
    ErrorResponse::new(error_codes::UNAUTHORIZED, "Unauthorized").to_response(StatusCode::UNAUTHORIZED)
}

/// 400 response listing each violated field constraint
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut first_message = None;
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "");

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    for (field, field_errors) in fields {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        if first_message.is_none() {
            first_message = messages.first().cloned();
        }
        response = response.add_detail(field, messages);
    }

    response.message = first_message.unwrap_or_else(|| "Invalid request body".to_string());
    response.to_response(StatusCode::BAD_REQUEST)
}

/// `JsonConfig` error handler: malformed or mistyped bodies become a 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, "Invalid request body")
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}
