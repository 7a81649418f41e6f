//! Credential checks behind `/register` and `/login`.

use sqlx::SqlitePool;
use validator::Validate;

use super::{hash_password, verify_password, AuthSettings, LoginRequest, LoginResponse, RegisterRequest};
use crate::error::AppError;
use crate::models::{NewUser, Role, User};

const DUPLICATE_USER: &str = "User already exists";

/// Registers a new account.
///
/// Fails with `BadRequest` when the role is unknown, the password is too short, the
/// username is malformed, or the username is already taken.
pub async fn register(
    pool: &SqlitePool,
    settings: &AuthSettings,
    request: RegisterRequest,
) -> Result<User, AppError> {
    let role: Role = request
        .role
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid role specified".into()))?;
    request.validate()?;

    if User::find_by_username(pool, &request.username).await?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE_USER.into()));
    }

    let cost = settings.bcrypt_cost;
    let password = request.password;
    let password_hash = run_blocking(move || hash_password(&password, cost)).await?;

    let user = User::create(
        pool,
        NewUser {
            username: request.username,
            password_hash,
            role,
        },
    )
    .await
    .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_USER))?;

    log::info!("Registered user {} with role {}", user.username, user.role);
    Ok(user)
}

/// bcrypt is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Password task failed: {}", e)))?
}

/// Checks credentials and issues a session token.
pub async fn login(
    pool: &SqlitePool,
    settings: &AuthSettings,
    request: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let user = User::find_by_username(pool, &request.username)
        .await?
        .ok_or(AppError::InvalidUsername)?;

    let password = request.password;
    let stored_hash = user.password_hash.clone();
    if !run_blocking(move || verify_password(&password, &stored_hash)).await? {
        log::warn!("Rejected login for {}: wrong password", user.username);
        return Err(AppError::InvalidPassword);
    }

    let jwt_token = settings.keys.generate_token(&user.username, user.role)?;
    log::info!("User {} logged in", user.username);

    Ok(LoginResponse {
        jwt_token,
        role: user.role,
        message: "Login success!".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn settings() -> AuthSettings {
        AuthSettings::new("session-test-secret", 4)
    }

    fn register_request(username: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    fn bad_request_message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_register_hashes_password() {
        let pool = db::connect_in_memory().await.unwrap();

        let user = register(&pool, &settings(), register_request("ada", "lovelace1", "admin"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_ne!(user.password_hash, "lovelace1");
        assert!(verify_password("lovelace1", &user.password_hash).unwrap());
    }

    #[actix_rt::test]
    async fn test_register_twice_fails() {
        let pool = db::connect_in_memory().await.unwrap();
        let settings = settings();

        register(&pool, &settings, register_request("ada", "lovelace1", "admin"))
            .await
            .unwrap();
        let err = register(&pool, &settings, register_request("ada", "different1", "member"))
            .await
            .unwrap_err();

        assert_eq!(bad_request_message(err), "User already exists");
    }

    #[actix_rt::test]
    async fn test_register_rejects_short_password_and_bad_role() {
        let pool = db::connect_in_memory().await.unwrap();
        let settings = settings();

        let err = register(&pool, &settings, register_request("ada", "1234567", "member"))
            .await
            .unwrap_err();
        assert_eq!(bad_request_message(err), "Password is too short");

        let err = register(&pool, &settings, register_request("ada", "12345678", "root"))
            .await
            .unwrap_err();
        assert_eq!(bad_request_message(err), "Invalid role specified");

        assert!(User::find_by_username(&pool, "ada").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_login_outcomes() {
        let pool = db::connect_in_memory().await.unwrap();
        let settings = settings();
        register(&pool, &settings, register_request("grace", "hopper123", "member"))
            .await
            .unwrap();

        let response = login(&pool, &settings, login_request("grace", "hopper123"))
            .await
            .unwrap();
        assert_eq!(response.role, Role::Member);
        assert_eq!(response.message, "Login success!");

        let claims = settings.keys.verify_token(&response.jwt_token).unwrap();
        assert_eq!(claims.username, "grace");
        assert_eq!(claims.role, Role::Member);

        let err = login(&pool, &settings, login_request("grace", "wrong-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPassword));

        let err = login(&pool, &settings, login_request("nobody", "hopper123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidUsername));
    }

    #[actix_rt::test]
    async fn test_login_with_empty_fields() {
        let pool = db::connect_in_memory().await.unwrap();
        let settings = settings();
        register(&pool, &settings, register_request("grace", "hopper123", "member"))
            .await
            .unwrap();

        let err = login(&pool, &settings, login_request("", "hopper123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidUsername));

        let err = login(&pool, &settings, login_request("grace", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPassword));
    }

    #[actix_rt::test]
    async fn test_register_unusual_usernames() {
        let pool = db::connect_in_memory().await.unwrap();
        let settings = settings();

        for username in ["Al", "john.doe", "Rahul Dravid"] {
            let user = register(&pool, &settings, register_request(username, "longenough", "member"))
                .await
                .unwrap();
            assert_eq!(user.username, username);
        }
    }
}
