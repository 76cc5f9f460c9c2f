//! SQLite persistence. One module per table, each a set of free async
//! functions over a `SqlitePool`.

pub mod admins;
pub mod courses;
pub mod feedback;
pub mod registration;
pub mod settings;
pub mod students;
pub mod teachers;
pub mod timetable;

use std::str::FromStr;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Opens the pool, creating the database file when it does not exist yet.
///
/// An in-memory database lives only as long as its connection, so it gets
/// a single connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool.connect_with(options).await
}

pub async fn run_migrations(db: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}

pub async fn ping(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(db).await?;
    Ok(())
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339()
}
