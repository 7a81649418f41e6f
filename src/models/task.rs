use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::models::{Project, User};

/// Represents the status of a task.
/// Stored as snake_case text in the `tasks.status` column.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Completed,
}

/// Represents a task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: i64,
    pub task_name: String,
    pub task_status: TaskStatus,
}

/// Longest accepted task name, in characters, after trimming.
pub const MAX_TASK_NAME_CHARS: usize = 200;

/// Input for `POST /newtask`.
///
/// `input` is the task name. `projectId` arrives as a number or, from the browser's
/// project select, as a numeric string.
#[derive(Debug, Deserialize, Validate)]
pub struct NewTaskRequest {
    #[validate(custom = "validate_task_name")]
    pub input: String,
    #[serde(rename = "projectId", deserialize_with = "id_from_number_or_string")]
    pub project_id: i64,
}

/// Outcome of a task creation: the row plus the edges written alongside it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    pub task: Task,
    pub project_id: i64,
    pub assigned_user_id: i64,
}

impl NewTaskRequest {
    /// The task name without surrounding whitespace.
    pub fn name(&self) -> &str {
        self.input.trim()
    }
}

fn validate_task_name(input: &str) -> Result<(), ValidationError> {
    let name = input.trim();
    let message = if name.is_empty() {
        "Task Name should not be Empty".to_string()
    } else if name.chars().count() > MAX_TASK_NAME_CHARS {
        format!("Task Name must be at most {} characters", MAX_TASK_NAME_CHARS)
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("input");
    error.message = Some(message.into());
    Err(error)
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid project id: {:?}", text))),
    }
}

const TASK_COLUMNS: &str = "t.id AS task_id, t.name AS task_name, t.status AS task_status";

impl Task {
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!("SELECT {} FROM tasks t ORDER BY t.id", TASK_COLUMNS))
            .fetch_all(pool)
            .await
    }

    /// Tasks belonging to any project the user is a member of, without duplicates.
    pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT DISTINCT {} \
             FROM tasks t \
             JOIN task_projects tp ON t.id = tp.task_id \
             JOIN user_projects up ON up.project_id = tp.project_id \
             WHERE up.user_id = ? \
             ORDER BY t.id",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn for_project(pool: &SqlitePool, project_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT DISTINCT {} \
             FROM tasks t \
             JOIN task_projects tp ON t.id = tp.task_id \
             WHERE tp.project_id = ? \
             ORDER BY t.id",
            TASK_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Tasks assigned to the user through `user_tasks`.
    pub async fn assigned_to(pool: &SqlitePool, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT DISTINCT {} \
             FROM tasks t \
             JOIN user_tasks ut ON t.id = ut.task_id \
             WHERE ut.user_id = ? \
             ORDER BY t.id",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Creates a `todo` task inside a project and assigns it to a random user.
    ///
    /// The task row, its `task_projects` edge and its `user_tasks` edge are written in
    /// one transaction. The assignee is drawn uniformly from every registered user.
    pub async fn create_in_project(
        pool: &SqlitePool,
        name: &str,
        project_id: i64,
    ) -> Result<CreatedTask, AppError> {
        if Project::find(pool, project_id).await?.is_none() {
            return Err(AppError::NotFound("Project not found".into()));
        }

        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (name, status) VALUES (?, ?) \
             RETURNING id AS task_id, name AS task_name, status AS task_status",
        )
        .bind(name)
        .bind(TaskStatus::Todo)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Task already exists"))?;

        sqlx::query("INSERT INTO task_projects (task_id, project_id) VALUES (?, ?)")
            .bind(task.task_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let user_ids = User::all_ids(&mut *tx).await?;
        let assigned_user_id = *user_ids
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| AppError::NotFound("No users available to assign the task to".into()))?;

        sqlx::query("INSERT INTO user_tasks (task_id, user_id) VALUES (?, ?)")
            .bind(task.task_id)
            .bind(assigned_user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!(
            "Created task {} in project {} assigned to user {}",
            task.task_id,
            project_id,
            assigned_user_id
        );

        Ok(CreatedTask {
            task,
            project_id,
            assigned_user_id,
        })
    }
}
