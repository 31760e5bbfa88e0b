use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use cf_core::services::password::MAX_PASSWORD_BYTES;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(
        length(min = 6, message = "Password must be at least 6 characters"),
        custom = "within_hash_limit"
    )]
    pub password: String,

    #[validate(custom = "required_text")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom = "within_hash_limit"
    )]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom = "required_text")]
    pub name: String,
}

/// Rejects empty and whitespace-only values
fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Name is required".into());
        return Err(error);
    }
    Ok(())
}

/// Rejects passwords bcrypt would silently truncate
fn within_hash_limit(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("too_long");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}
