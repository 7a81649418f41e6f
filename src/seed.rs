//! Sample accounts, projects, and tasks for a fresh database.
//!
//! Seeding is idempotent: accounts are inserted with `INSERT OR IGNORE`, and the
//! project/task catalog is only written when the `projects` table is empty.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{Role, TaskStatus};

const USERS: &[(&str, &str, Role)] = &[
    ("Virat", "Kohli", Role::Admin),
    ("Sachin", "tendulkar", Role::Member),
    ("virendar", "sehwag", Role::Member),
];

const PROJECTS: &[&str] = &["E-commerce App", "To-do App", "Website Development"];

const TASKS: &[(&str, TaskStatus)] = &[
    ("Authentication Handling", TaskStatus::Todo),
    ("Create Nav-Bar", TaskStatus::Completed),
    ("Cart Page", TaskStatus::InProgress),
    ("Home Page", TaskStatus::InProgress),
    ("Payment Page", TaskStatus::InProgress),
    ("Database Management", TaskStatus::Todo),
    ("Front-End Management", TaskStatus::Todo),
    ("Server Management", TaskStatus::Todo),
];

// (user, project)
const MEMBERSHIPS: &[(&str, &str)] = &[
    ("Virat", "E-commerce App"),
    ("Sachin", "E-commerce App"),
    ("virendar", "To-do App"),
    ("Virat", "Website Development"),
    ("Sachin", "Website Development"),
    ("virendar", "Website Development"),
];

// (task, project)
const TASK_PROJECTS: &[(&str, &str)] = &[
    ("Authentication Handling", "E-commerce App"),
    ("Create Nav-Bar", "E-commerce App"),
    ("Cart Page", "E-commerce App"),
    ("Home Page", "E-commerce App"),
    ("Payment Page", "E-commerce App"),
    ("Authentication Handling", "To-do App"),
    ("Database Management", "To-do App"),
    ("Front-End Management", "To-do App"),
    ("Server Management", "Website Development"),
    ("Front-End Management", "Website Development"),
    ("Database Management", "Website Development"),
];

/// Seeds the sample data, hashing passwords with `bcrypt_cost`.
pub async fn seed(pool: &SqlitePool, bcrypt_cost: u32) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let mut inserted_users = 0;
    for &(username, password, role) in USERS {
        let password_hash = hash_password(password, bcrypt_cost)?;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, password_hash, role) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&mut *tx)
        .await?;
        inserted_users += result.rows_affected();
    }

    let project_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&mut *tx)
        .await?;

    if project_count == 0 {
        seed_catalog(&mut tx).await?;
        log::info!(
            "Seeded {} projects, {} tasks and their associations",
            PROJECTS.len(),
            TASKS.len()
        );
    } else {
        log::debug!("Projects already present, skipping sample catalog");
    }

    tx.commit().await?;

    if inserted_users > 0 {
        log::info!("Seeded {} sample users", inserted_users);
    }
    Ok(())
}

async fn seed_catalog(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
    for &name in PROJECTS {
        sqlx::query("INSERT OR IGNORE INTO projects (name) VALUES (?)")
            .bind(name)
            .execute(&mut **tx)
            .await?;
    }

    for &(name, status) in TASKS {
        sqlx::query("INSERT OR IGNORE INTO tasks (name, status) VALUES (?, ?)")
            .bind(name)
            .bind(status)
            .execute(&mut **tx)
            .await?;
    }

    for &(username, project) in MEMBERSHIPS {
        sqlx::query(
            "INSERT INTO user_projects (user_id, project_id) \
             SELECT u.id, p.id FROM users u, projects p \
             WHERE u.username = ? AND p.name = ?",
        )
        .bind(username)
        .bind(project)
        .execute(&mut **tx)
        .await?;
    }

    for &(task, project) in TASK_PROJECTS {
        sqlx::query(
            "INSERT INTO task_projects (task_id, project_id) \
             SELECT t.id, p.id FROM tasks t, projects p \
             WHERE t.name = ? AND p.name = ?",
        )
        .bind(task)
        .bind(project)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
