use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::hello::Hello;

#[async_trait]
pub trait HelloRepository: Send + Sync {
    async fn save(&self, hello: &Hello) -> RepositoryResult<()>;

    async fn find_all(&self) -> RepositoryResult<Vec<Hello>>;
}
