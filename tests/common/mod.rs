#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    test, Error,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracker::{auth::AuthSettings, db, seed};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const BCRYPT_COST: u32 = 4;

/// A fresh, migrated and seeded in-memory database.
pub async fn seeded_pool() -> SqlitePool {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    seed::seed(&pool, BCRYPT_COST)
        .await
        .expect("Failed to seed sample data");
    pool
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings::new(JWT_SECRET, BCRYPT_COST)
}

/// Builds the full application around `$pool`, the same way `main` does.
macro_rules! spawn_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool))
                .app_data(actix_web::web::Data::new(crate::common::auth_settings()))
                .wrap(actix_web::middleware::Logger::default())
                .configure(tracker::routes::config),
        )
        .await
    };
}
pub(crate) use spawn_app;

/// Logs in and returns the session token.
pub async fn login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["jwtToken"]
        .as_str()
        .unwrap_or_else(|| panic!("login for {} returned no token: {}", username, body))
        .to_string()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
