use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Health check endpoint
///
/// Reports whether the database answers a trivial query, plus the server time.
/// Responds 503 when the database is unreachable.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    let database_ok = sqlx::query("SELECT 1").execute(pool.get_ref()).await.is_ok();

    let body = json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "database": if database_ok { "up" } else { "down" },
        "timestamp": Utc::now()
    });

    if database_ok {
        HttpResponse::Ok().json(body)
    } else {
        log::error!("Health check failed: database is unreachable");
        HttpResponse::ServiceUnavailable().json(body)
    }
}
