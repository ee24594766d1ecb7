use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::team::Team;

/// Repository trait for the Team entity
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> RepositoryResult<()>;

    /// Find a team by its ID, with its member back-reference rebuilt
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Team>>;

    /// Find all teams ordered by name
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;

    /// Delete a team by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}
