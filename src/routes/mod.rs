pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::AuthenticatedUser;
use crate::error::AppError;

/// Registers every route.
///
/// `/health`, `/register`, `/login` and `/newtask` are public. The listing routes
/// carry their own `AuthMiddleware` wrap, so unknown paths still fall through to
/// the default 404. Expects `web::Data<SqlitePool>` and `web::Data<AuthSettings>`
/// in app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {}", err)).into()
    }))
    .service(health::health)
    .service(auth::register)
    .service(auth::login)
    .service(tasks::create_task)
    .service(projects::home)
    .service(projects::user_projects)
    .service(projects::all_projects)
    .service(projects::project_tasks)
    .service(tasks::user_tasks)
    .service(tasks::all_tasks)
    .service(tasks::my_tasks);
}

/// Optional `?username=` filter on per-user listings.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

impl UsernameQuery {
    /// The user a listing is about: the explicit parameter if given, else the caller.
    pub fn subject<'a>(&'a self, caller: &'a AuthenticatedUser) -> &'a str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| caller.username())
    }
}

/// Builds a `{"<key>": [...]}` listing. An empty listing also carries `message`.
pub(crate) fn listing<T: Serialize>(
    key: &str,
    items: Vec<T>,
    empty_message: &str,
) -> Result<HttpResponse, AppError> {
    let is_empty = items.is_empty();
    let items = serde_json::to_value(items)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode {}: {}", key, e)))?;

    let mut body = Map::new();
    body.insert(key.to_string(), items);
    if is_empty {
        body.insert("message".into(), Value::String(empty_message.to_string()));
    }

    Ok(HttpResponse::Ok().json(Value::Object(body)))
}
