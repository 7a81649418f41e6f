use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A project row, serialized with the field names the browser client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
}

impl Project {
    pub async fn find(pool: &SqlitePool, project_id: i64) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT id AS project_id, name AS project_name FROM projects WHERE id = ?",
        )
        .bind(project_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn all(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT id AS project_id, name AS project_name FROM projects ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Projects joined to the user through `user_projects`, without duplicates.
    pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT DISTINCT p.id AS project_id, p.name AS project_name \
             FROM projects p \
             JOIN user_projects up ON p.id = up.project_id \
             WHERE up.user_id = ? \
             ORDER BY p.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name) VALUES (?) RETURNING id AS project_id, name AS project_name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Adds a `user_projects` edge between the user and this project.
    pub async fn add_member(pool: &SqlitePool, project_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_projects (user_id, project_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
