use crate::{
    auth::{AuthMiddleware, AuthenticatedUser},
    error::AppError,
    models::{Project, Task, User},
    routes::{listing, UsernameQuery},
};
use actix_web::{get, web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;

async fn require_user(pool: &SqlitePool, username: &str) -> Result<User, AppError> {
    User::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Home listing: names of the projects the caller belongs to.
///
/// Identity comes from the verified token only.
///
/// ## Responses:
/// - `200 OK`: `[{"projectName": ...}, ...]`.
/// - `404 Not Found`: the token names a user that no longer exists.
#[get("/", wrap = "AuthMiddleware")]
pub async fn home(
    pool: web::Data<SqlitePool>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&pool, caller.username()).await?;
    let names: Vec<_> = Project::for_user(&pool, user.id)
        .await?
        .into_iter()
        .map(|project| json!({ "projectName": project.project_name }))
        .collect();

    Ok(HttpResponse::Ok().json(names))
}

/// Projects a user belongs to.
///
/// ## Query Parameters:
/// - `username` (optional): whose projects to list. Defaults to the caller.
///
/// ## Responses:
/// - `200 OK`: `{"projects": [...]}`, with a `message` when there are none.
/// - `404 Not Found`: unknown username.
#[get("/projects", wrap = "AuthMiddleware")]
pub async fn user_projects(
    pool: web::Data<SqlitePool>,
    query: web::Query<UsernameQuery>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&pool, query.subject(&caller)).await?;
    let projects = Project::for_user(&pool, user.id).await?;

    listing("projects", projects, "No projects found for this user")
}

/// Every project, regardless of membership.
#[get("/allprojects", wrap = "AuthMiddleware")]
pub async fn all_projects(
    pool: web::Data<SqlitePool>,
    _caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let projects = Project::all(&pool).await?;

    listing("allprojects", projects, "No projects found")
}

/// Tasks linked to one project.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...]}`, with a `message` when there are none.
/// - `404 Not Found`: unknown project id.
#[get("/projects/{project_id}/tasks", wrap = "AuthMiddleware")]
pub async fn project_tasks(
    pool: web::Data<SqlitePool>,
    project_id: web::Path<i64>,
    _caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let project_id = project_id.into_inner();
    if Project::find(&pool, project_id).await?.is_none() {
        return Err(AppError::NotFound("Project not found".into()));
    }

    let tasks = Task::for_project(&pool, project_id).await?;
    listing("tasks", tasks, "No tasks found for this project")
}
