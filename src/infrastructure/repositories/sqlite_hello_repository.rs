use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::hello::Hello;
use crate::domain::repositories::{HelloRepository, RepositoryResult};

pub struct SqliteHelloRepository {
    pool: SqlitePool,
}

impl SqliteHelloRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HelloRepository for SqliteHelloRepository {
    async fn save(&self, hello: &Hello) -> RepositoryResult<()> {
        sqlx::query("INSERT INTO hello (id) VALUES (?) ON CONFLICT (id) DO NOTHING")
            .bind(hello.id())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Hello>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM hello ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id,)| Hello::from_persistence(id))
            .collect())
    }
}
