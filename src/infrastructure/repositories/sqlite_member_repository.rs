use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::member::Member;
use crate::domain::repositories::{MemberRepository, RepositoryError, RepositoryResult};
use crate::dto::{MemberSearchCondition, MemberTeamDto};
use crate::query::{
    select, select_from_member, Page, QMember, QTeam, Query, QueryResults, TypedExpr,
};

/// SQLite implementation of MemberRepository
///
/// Reads go through the query builder; writes are plain statements.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn search_query(condition: &MemberSearchCondition) -> Query<MemberTeamDto> {
        let m = QMember::member();
        let t = QTeam::team();

        select(MemberTeamDto::projection(&m, &t))
            .left_join_team()
            .filter_condition(condition.to_condition())
            .order_by(m.username.asc())
            .order_by(m.id.asc())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, member: &Member) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO member (id, username, age, team_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                username = excluded.username,
                age = excluded.age,
                team_id = excluded.team_id
            "#,
        )
        .bind(member.id())
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .execute(&self.pool)
        .await?;

        tracing::debug!(member_id = %member.id(), "Member saved");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>> {
        let m = QMember::member();
        select_from_member()
            .filter(m.id.eq(id))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        select_from_member().fetch(&self.pool).await
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let m = QMember::member();
        select_from_member()
            .filter(m.username.eq(username))
            .fetch(&self.pool)
            .await
    }

    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamDto>> {
        Self::search_query(condition).fetch(&self.pool).await
    }

    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: Page,
    ) -> RepositoryResult<QueryResults<MemberTeamDto>> {
        Self::search_query(condition)
            .page(page)
            .fetch_results(&self.pool)
            .await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM member WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("member {}", id)));
        }

        tracing::info!(member_id = %id, "Member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_breaks_username_ties_by_id() {
        let sql = SqliteMemberRepository::search_query(&MemberSearchCondition::default()).to_sql();

        assert!(sql.ends_with(" ORDER BY m.username ASC, m.id ASC"), "{}", sql);
    }
}
