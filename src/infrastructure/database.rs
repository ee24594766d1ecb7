use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS team (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS member (
        id BLOB PRIMARY KEY NOT NULL,
        username TEXT,
        age INTEGER NOT NULL,
        team_id BLOB REFERENCES team(id) ON DELETE SET NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_member_team_id ON member(team_id)",
    "CREATE TABLE IF NOT EXISTS hello (
        id BLOB PRIMARY KEY NOT NULL
    )",
];

/// Opens a pool for `database_url` and creates the schema
///
/// In-memory databases live and die with their connection, so they get a
/// single connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    create_schema(&pool).await?;
    Ok(pool)
}

/// Fresh private database, used by tests
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    connect("sqlite::memory:").await
}

/// Idempotent; safe to run at every startup
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Schema ready");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://roster?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://roster.db?mode=rwc"));
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();

        create_schema(&pool).await.unwrap();

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('team', 'member', 'hello')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 3);
    }
}
