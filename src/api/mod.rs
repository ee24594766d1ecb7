// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use handlers::{hello, members, teams};

/// All routes, with the pool as shared state
///
/// Layers (tracing, CORS) are added by the binary.
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/hello", get(hello::hello))
        // Member routes
        .route("/api/members", get(members::search_members))
        .route("/api/members/page", get(members::search_members_page))
        // Team routes
        .route("/api/teams", post(teams::create_team).get(teams::list_teams))
        .route("/api/teams/:id", get(teams::get_team).delete(teams::delete_team))
        .with_state(pool)
}
