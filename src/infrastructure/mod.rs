// Infrastructure layer module
// SQLite pool setup and the repository adapters built on it

pub mod database;
pub mod repositories;

pub use database::{connect, connect_in_memory, create_schema};
