// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod sqlite_hello_repository;
pub mod sqlite_member_repository;
pub mod sqlite_team_repository;

pub use sqlite_hello_repository::SqliteHelloRepository;
pub use sqlite_member_repository::SqliteMemberRepository;
pub use sqlite_team_repository::SqliteTeamRepository;
