//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserProfile};

/// Authentication response containing the session token and the user it belongs to
///
/// Returned by both registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed session token for the `Authorization: Bearer` header
    pub access_token: String,

    /// Public profile of the authenticated user
    pub user: UserProfile,
}

impl AuthResponse {
    /// Creates a response for `user` carrying `access_token`
    pub fn new(access_token: String, user: &User) -> Self {
        Self {
            access_token,
            user: user.profile(),
        }
    }
}
