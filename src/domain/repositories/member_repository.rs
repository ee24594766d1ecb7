use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::dto::{MemberSearchCondition, MemberTeamDto};
use crate::query::{Page, QueryResults};

/// Repository trait for the Member entity
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a member (insert or update)
    async fn save(&self, member: &Member) -> RepositoryResult<()>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>>;

    /// Find all members
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// Find all members with the given username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Search members joined with their team; absent conditions are ignored
    async fn search(&self, condition: &MemberSearchCondition)
        -> RepositoryResult<Vec<MemberTeamDto>>;

    /// Paged variant of [`MemberRepository::search`]
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: Page,
    ) -> RepositoryResult<QueryResults<MemberTeamDto>>;

    /// Delete a member by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}
