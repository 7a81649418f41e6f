use crate::error::AppError;
use crate::models::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a session token.
///
/// Tokens carry no `exp` claim; session lifetime is left to the client's cookie expiry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated account.
    pub username: String,
    /// Role granted at registration.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues an HS256 token for the given identity.
    pub fn generate_token(&self, username: &str, role: Role) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
            role,
            iat: chrono::Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies the token signature and decodes its claims.
    ///
    /// Returns `AppError::Unauthorized` if the token is malformed or signed with another key.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &validation())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation
}
