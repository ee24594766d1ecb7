// Repository ports
// Implementations live in the infrastructure layer

pub mod errors;
pub mod hello_repository;
pub mod member_repository;
pub mod team_repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use hello_repository::HelloRepository;
pub use member_repository::MemberRepository;
pub use team_repository::TeamRepository;
