use crate::{
    auth::{AuthMiddleware, AuthenticatedUser},
    error::AppError,
    models::{NewTaskRequest, Task, User},
    routes::{listing, UsernameQuery},
};
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Tasks in any project the user belongs to.
///
/// ## Query Parameters:
/// - `username` (optional): whose tasks to list. Defaults to the caller.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...]}`, with a `message` when there are none.
/// - `404 Not Found`: unknown username.
#[get("/tasks", wrap = "AuthMiddleware")]
pub async fn user_tasks(
    pool: web::Data<SqlitePool>,
    query: web::Query<UsernameQuery>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = User::find_by_username(&pool, query.subject(&caller))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let tasks = Task::for_user(&pool, user.id).await?;

    listing("tasks", tasks, "No tasks found for this user")
}

/// Every task, regardless of project.
#[get("/alltasks", wrap = "AuthMiddleware")]
pub async fn all_tasks(
    pool: web::Data<SqlitePool>,
    _caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let tasks = Task::all(&pool).await?;

    listing("allTasks", tasks, "No tasks found")
}

/// Tasks assigned to the caller.
#[get("/mytasks", wrap = "AuthMiddleware")]
pub async fn my_tasks(
    pool: web::Data<SqlitePool>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = User::find_by_username(&pool, caller.username())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let tasks = Task::assigned_to(&pool, user.id).await?;

    listing("tasks", tasks, "No tasks assigned to this user")
}

/// Creates a task in a project and assigns it to a random user.
///
/// Public: the browser's manage view posts here without a token.
///
/// ## Request Body:
/// `{"input": "<task name>", "projectId": <id>}`. Surrounding whitespace in the
/// name is dropped.
///
/// ## Responses:
/// - `201 Created`: `{"message", "task", "projectId", "assignedUserId"}`.
/// - `400 Bad Request`: blank or overlong name, or a name that already exists.
/// - `404 Not Found`: unknown project.
#[post("/newtask")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    task_data: web::Json<NewTaskRequest>,
) -> Result<HttpResponse, AppError> {
    task_data.validate()?;

    let created = Task::create_in_project(&pool, task_data.name(), task_data.project_id).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "task": created.task,
        "projectId": created.project_id,
        "assignedUserId": created.assigned_user_id,
    })))
}
