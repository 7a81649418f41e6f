use crate::{
    auth::{self, AuthSettings, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

/// Register a new user
///
/// ## Request Body:
/// `{"username", "password", "role"}` where `role` is `admin` or `member`.
///
/// ## Responses:
/// - `200 OK`: `{"message": "User created successfully"}`.
/// - `400 Bad Request`: unknown role, password of 7 characters or fewer, malformed
///   username, or a username that is already taken.
/// - `500 Internal Server Error`: database or hashing failure.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    settings: web::Data<AuthSettings>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    auth::register(&pool, &settings, register_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User created successfully" })))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{"jwtToken", "role", "message"}`.
/// - `400 Bad Request`: `Invalid Username` or `Invalid Password`.
/// - `500 Internal Server Error`: database or hashing failure.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    settings: web::Data<AuthSettings>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth::login(&pool, &settings, login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
