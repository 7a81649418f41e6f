pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::Role;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use session::{login, register};
pub use token::{Claims, TokenKeys};

/// Everything the auth layer needs at request time, shared through `web::Data`.
#[derive(Clone)]
pub struct AuthSettings {
    pub keys: TokenKeys,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: &str, bcrypt_cost: u32) -> Self {
        Self {
            keys: TokenKeys::from_secret(jwt_secret),
            bcrypt_cost,
        }
    }
}

/// Represents the payload for a user login request.
///
/// Not validated up front: an empty username simply matches no account.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Any non-empty name.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Must be longer than 7 characters.
    #[validate(length(min = 8, message = "Password is too short"))]
    pub password: String,
    /// Either `admin` or `member`.
    #[validate(custom = "validate_role")]
    pub role: String,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("role");
        error.message = Some("Invalid role specified".into());
        error
    })
}

/// Response body for a successful login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
    pub role: Role,
    pub message: String,
}
