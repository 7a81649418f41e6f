//! bcrypt hashing for stored account passwords.

use crate::error::AppError;

/// Hashes `password` with a fresh salt at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks `password` against a stored hash.
///
/// A stored value that is not a bcrypt hash is an internal error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, stored_hash).map_err(|e| {
        AppError::InternalServerError(format!("Stored password hash is unreadable: {}", e))
    })
}
