use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, RepositoryResult, TeamRepository};
use crate::domain::team::Team;

/// SQLite implementation of TeamRepository
///
/// The `members` back-reference is not stored; it is rebuilt from
/// `member.team_id` whenever a team is loaded.
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn member_ids_by_team(&self) -> RepositoryResult<HashMap<Uuid, Vec<Uuid>>> {
        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT team_id, id FROM member WHERE team_id IS NOT NULL ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_team: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (team_id, member_id) in rows {
            by_team.entry(team_id).or_default().push(member_id);
        }
        Ok(by_team)
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn save(&self, team: &Team) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team (id, name)
            VALUES (?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name
            "#,
        )
        .bind(team.id())
        .bind(team.name())
        .execute(&self.pool)
        .await?;

        tracing::debug!(team_id = %team.id(), name = team.name(), "Team saved");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let row: Option<(Uuid, String)> = sqlx::query_as("SELECT id, name FROM team WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some((id, name)) = row else {
            return Ok(None);
        };

        let members: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM member WHERE team_id = ? ORDER BY rowid")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(Some(Team::from_persistence(
            id,
            name,
            members.into_iter().map(|(member_id,)| member_id).collect(),
        )))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as("SELECT id, name FROM team ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        let mut members = self.member_ids_by_team().await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| {
                Team::from_persistence(id, name, members.remove(&id).unwrap_or_default())
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM team WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("team {}", id)));
        }

        tracing::info!(team_id = %id, "Team deleted");
        Ok(())
    }
}
