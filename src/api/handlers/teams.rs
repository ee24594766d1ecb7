use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;
use crate::infrastructure::repositories::SqliteTeamRepository;

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Team with the ids of its members
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Uuid>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            members: team.members().to_vec(),
        }
    }
}

/// Create a new team
///
/// POST /api/teams
pub async fn create_team(
    State(pool): State<SqlitePool>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Team name must not be empty"));
    }

    let team = Team::new(req.name);
    let team_repo = SqliteTeamRepository::new(pool);
    team_repo.save(&team).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    let team = team_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// List all teams
///
/// GET /api/teams
pub async fn list_teams(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    let teams = team_repo.find_all().await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// Delete a team; its members stay, without a team
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    team_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
