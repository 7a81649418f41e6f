//! Database bootstrap: connection pool creation and schema migrations.
//!
//! The pool is created once by `main` and handed to every handler through
//! `web::Data<SqlitePool>`. Tests build their own pool against `sqlite::memory:`,
//! which keeps every test isolated from the others.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const MEMORY_MARKER: &str = ":memory:";

/// Opens a connection pool for `database_url`.
///
/// File databases are created if they do not exist yet. Foreign keys are enforced on
/// every connection. An in-memory database lives only as long as its connection, so
/// for `sqlite::memory:` the pool is pinned to one connection that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(MEMORY_MARKER) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    log::debug!("Opened database pool for {}", database_url);
    Ok(pool)
}

/// Applies the embedded migrations from `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database schema is up to date");
    Ok(())
}

/// Opens an isolated, migrated in-memory database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = connect("sqlite::memory:", 1).await?;
    migrate(&pool).await?;
    Ok(pool)
}
