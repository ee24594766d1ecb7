//! End-to-end API integration tests
//!
//! These tests drive the router through `oneshot` against an in-memory
//! database:
//! - The hello endpoint
//! - Member search, plain and paged
//! - Team creation, lookup and deletion

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{seeded_db, setup_test_db};
use roster_api::api;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_hello() {
    let pool = setup_test_db().await;
    let app = api::router(pool);

    let (status, body) = get(app, "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"Hello!");
}

#[tokio::test]
async fn test_search_members_without_filters() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members").await;

    assert_eq!(status, StatusCode::OK);
    let members = json.as_array().expect("array of members");
    assert_eq!(members.len(), 4);
    assert_eq!(members[0]["username"], "member1");
    assert_eq!(members[0]["team_name"], "TeamA");
    assert!(members[0]["member_id"].is_string());
}

#[tokio::test]
async fn test_search_members_with_filters() {
    let (pool, fixture) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members?team_name=TeamB&age_goe=15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([{
            "member_id": fixture.members[3],
            "username": "member4",
            "age": 20,
            "team_id": fixture.team_b,
            "team_name": "TeamB"
        }])
    );
}

#[tokio::test]
async fn test_search_members_ignores_blank_parameters() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members?username=&team_name=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_search_members_rejects_malformed_age() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, _) = get(app, "/api/members?age_goe=old").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_members_page() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members/page?offset=1&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 4);
    assert_eq!(json["offset"], 1);
    assert_eq!(json["limit"], 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["username"], "member2");
    assert_eq!(results[1]["username"], "member3");
}

#[tokio::test]
async fn test_search_members_page_defaults() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members/page?age_loe=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["limit"], 20);
}

#[tokio::test]
async fn test_search_members_page_rejects_zero_limit() {
    let (pool, _) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/members/page?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "limit must be positive");
}

#[tokio::test]
async fn test_create_and_get_team() {
    let pool = setup_test_db().await;
    let app = api::router(pool);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/teams")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "name": "TeamC" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: Value = serde_json::from_slice(&body).unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let (status, json) = get_json(app, &format!("/api/teams/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "TeamC");
    assert_eq!(json["members"], json!([]));
}

#[tokio::test]
async fn test_list_teams_includes_members() {
    let (pool, fixture) = seeded_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, "/api/teams").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["name"], "TeamA");
    assert_eq!(
        json[0]["members"],
        json!([fixture.members[0], fixture.members[1]])
    );
}

#[tokio::test]
async fn test_get_unknown_team_is_not_found() {
    let pool = setup_test_db().await;
    let app = api::router(pool);

    let (status, json) = get_json(app, &format!("/api/teams/{}", uuid::Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Team not found");
}

#[tokio::test]
async fn test_delete_team() {
    let (pool, fixture) = seeded_db().await;
    let app = api::router(pool);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/teams/{}", fixture.team_a))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(app, &format!("/api/teams/{}", fixture.team_a)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
