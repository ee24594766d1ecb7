use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::domain::repositories::MemberRepository;
use crate::dto::{MemberSearchCondition, MemberTeamDto};
use crate::infrastructure::repositories::SqliteMemberRepository;
use crate::query::{Page, QueryResults};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Query string of the paged search
///
/// Spelled out rather than flattened: the query-string decoder cannot
/// parse numbers inside a flattened struct.
#[derive(Debug, Deserialize)]
pub struct MemberPageParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl MemberPageParams {
    fn into_parts(self) -> (MemberSearchCondition, Page) {
        let condition = MemberSearchCondition {
            username: self.username,
            team_name: self.team_name,
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        };
        let page = Page::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        (condition, page)
    }
}

/// Search members with their team
///
/// GET /api/members?username=&team_name=&age_goe=&age_loe=
pub async fn search_members(
    State(pool): State<SqlitePool>,
    Query(condition): Query<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
    let member_repo = SqliteMemberRepository::new(pool);
    let members = member_repo.search(&condition).await?;

    Ok(Json(members))
}

/// Paged member search
///
/// GET /api/members/page?...&offset=&limit=
pub async fn search_members_page(
    State(pool): State<SqlitePool>,
    Query(params): Query<MemberPageParams>,
) -> Result<Json<QueryResults<MemberTeamDto>>, ApiError> {
    let (condition, page) = params.into_parts();
    if page.limit == 0 {
        return Err(ApiError::bad_request("limit must be positive"));
    }

    let member_repo = SqliteMemberRepository::new(pool);
    let results = member_repo.search_page(&condition, page).await?;

    Ok(Json(results))
}
