use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use moodful_recs::api::{create_router, AppState};
use moodful_recs::config::Config;
use moodful_recs::error::{AppError, AppResult};
use moodful_recs::models::Video;
use moodful_recs::services::CatalogProvider;

struct StubProvider {
    videos: Option<Vec<Video>>,
}

#[async_trait::async_trait]
impl CatalogProvider for StubProvider {
    async fn fetch_videos(&self) -> AppResult<Vec<Video>> {
        self.videos
            .clone()
            .ok_or_else(|| AppError::ExternalApi("unreachable".to_string()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn create_test_server_with(videos: Option<Vec<Video>>) -> TestServer {
    let state = AppState::in_memory(Arc::new(StubProvider { videos }), Config::default());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(Some(Vec::new()))
}

async fn create_user(server: &TestServer, body: Value) {
    server
        .post("/users")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
}

async fn create_video(server: &TestServer, body: Value) {
    server
        .post("/videos")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
}

fn ids(items: &[Value]) -> Vec<&str> {
    items.iter().map(|v| v["id"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["env_loaded"], false);
    assert_eq!(body["videos"], 0);
    assert_eq!(body["users"], 0);
    assert_eq!(body["interactions"], 0);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let request_id = "9b2c6f4e-1d3a-4c57-9e0b-2f8a7d6c5b41";

    let response = server
        .get("/health")
        .add_header("x-request-id", request_id)
        .await;

    assert_eq!(response.header("x-request-id"), request_id);
}

#[tokio::test]
async fn test_create_get_and_delete_video() {
    let server = create_test_server();

    create_video(
        &server,
        json!({
            "id": "adv_1",
            "title": "Mountain Trek",
            "description": "Adventure in the Alps",
            "tags": ["adventure", "travel"],
            "mood": "adventurous"
        }),
    )
    .await;

    let response = server.get("/videos/adv_1").await;
    response.assert_status_ok();
    let video: Value = response.json();
    assert_eq!(video["title"], "Mountain Trek");
    assert_eq!(video["tags"], json!(["adventure", "travel"]));

    let response = server.delete("/videos/adv_1").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["deleted"], true);

    server
        .get("/videos/adv_1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/videos/adv_1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_video_conflicts() {
    let server = create_test_server();
    create_video(&server, json!({"id": "v1", "title": "First"})).await;

    let response = server
        .post("/videos")
        .json(&json!({"id": "v1", "title": "Second"}))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "Video already exists");
}

#[tokio::test]
async fn test_list_videos_filters_and_pages() {
    let server = create_test_server();
    server.post("/seed/videos").await.assert_status_ok();

    let response = server
        .get("/videos")
        .add_query_param("mood", "CHEERFUL")
        .await;
    response.assert_status_ok();
    let videos: Vec<Value> = response.json();
    assert_eq!(ids(&videos), vec!["fun_1", "fun_2"]);

    let response = server.get("/videos").add_query_param("tag", "nature").await;
    let videos: Vec<Value> = response.json();
    assert_eq!(ids(&videos), vec!["adv_1", "calm_1"]);

    let response = server
        .get("/videos")
        .add_query_param("page", 2)
        .add_query_param("page_size", 4)
        .await;
    let videos: Vec<Value> = response.json();
    assert_eq!(ids(&videos), vec!["edu_1", "edu_2", "fun_1", "fun_2"]);

    server
        .get("/videos")
        .add_query_param("page_size", 500)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let server = create_test_server();

    let first: Value = server.post("/seed/videos").await.json();
    let second: Value = server.post("/seed/videos").await.json();

    assert_eq!(first, json!({"seeded": 10, "total": 10}));
    assert_eq!(second, json!({"seeded": 0, "total": 10}));
}

#[tokio::test]
async fn test_user_partial_updates() {
    let server = create_test_server();
    create_user(
        &server,
        json!({"id": "u1", "name": "Alice", "interests": ["travel"], "mood": "calm"}),
    )
    .await;

    // omitted fields stay as they are
    let response = server
        .patch("/users/u1")
        .json(&json!({"interests": ["comedy", "fun"]}))
        .await;
    response.assert_status_ok();
    let user: Value = response.json();
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["interests"], json!(["comedy", "fun"]));
    assert_eq!(user["mood"], "calm");

    // explicit null clears the mood on the general path too
    let user: Value = server
        .patch("/users/u1")
        .json(&json!({"mood": null}))
        .await
        .json();
    assert_eq!(user["mood"], Value::Null);

    let user: Value = server
        .patch("/users/u1/mood")
        .json(&json!({"mood": "cheerful"}))
        .await
        .json();
    assert_eq!(user["mood"], "cheerful");

    let user: Value = server
        .patch("/users/u1/mood")
        .json(&json!({"mood": null}))
        .await
        .json();
    assert_eq!(user["mood"], Value::Null);

    let stored: Value = server.get("/users/u1").await.json();
    assert_eq!(stored["interests"], json!(["comedy", "fun"]));
}

#[tokio::test]
async fn test_update_unknown_user() {
    let server = create_test_server();

    server
        .patch("/users/ghost/mood")
        .json(&json!({"mood": "calm"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/users/ghost")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_interaction_requires_existing_entities() {
    let server = create_test_server();
    create_user(&server, json!({"id": "u1", "name": "Alice"})).await;
    create_video(&server, json!({"id": "v1", "title": "Pranks"})).await;

    let response = server
        .post("/interactions")
        .json(&json!({"user_id": "u1", "video_id": "v1", "action": "like"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["recorded"], true);

    let response = server
        .post("/interactions")
        .json(&json!({"user_id": "u1", "video_id": "missing", "action": "like"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Video not found");

    let response = server
        .post("/interactions")
        .json(&json!({"user_id": "nobody", "video_id": "v1", "action": "like"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "User not found");

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["interactions"], 1);
}

#[tokio::test]
async fn test_recommendations_with_scores() {
    let server = create_test_server();
    create_user(
        &server,
        json!({"id": "u1", "name": "Sam", "interests": ["adventure"]}),
    )
    .await;
    create_video(
        &server,
        json!({"id": "a", "title": "A", "tags": ["adventure"], "mood": "adventurous"}),
    )
    .await;
    create_video(
        &server,
        json!({"id": "b", "title": "B", "tags": ["romance"], "mood": "romance"}),
    )
    .await;

    let response = server.get("/recommendations/u1").await;

    response.assert_status_ok();
    let items: Vec<Value> = response.json();
    assert_eq!(ids(&items), vec!["a", "b"]);
    assert_eq!(items[0]["score"], 100.0);
    assert_eq!(items[1]["score"], 0.0);
    assert_eq!(items[0]["mood"], "adventurous");
}

#[tokio::test]
async fn test_recommendations_mood_filter_and_fallback() {
    let server = create_test_server();
    server.post("/seed/videos").await.assert_status_ok();
    create_user(
        &server,
        json!({"id": "u1", "name": "Sam", "interests": ["nature"], "mood": "calm"}),
    )
    .await;

    let items: Vec<Value> = server.get("/recommendations/u1").await.json();
    assert_eq!(ids(&items), vec!["calm_1"]);
    assert_eq!(items[0]["score"], 100.0);

    // nothing matches, so the whole ranking comes back
    server
        .patch("/users/u1/mood")
        .json(&json!({"mood": "melancholy"}))
        .await
        .assert_status_ok();

    let items: Vec<Value> = server
        .get("/recommendations/u1")
        .add_query_param("details", false)
        .await
        .json();
    assert_eq!(items.len(), 10);
    assert_eq!(ids(&items)[..2], ["adv_1", "calm_1"]);
    assert!(items[0].get("score").is_none());
}

#[tokio::test]
async fn test_recommendations_follow_interactions() {
    let server = create_test_server();
    server.post("/seed/videos").await.assert_status_ok();
    create_user(&server, json!({"id": "u1", "name": "Sam"})).await;

    server
        .post("/interactions")
        .json(&json!({"user_id": "u1", "video_id": "edu_1", "action": "watch"}))
        .await
        .assert_status_ok();

    let items: Vec<Value> = server
        .get("/recommendations/u1")
        .add_query_param("limit", 2)
        .await
        .json();

    // edu_1 carries ml + education + ai; edu_2 shares education
    assert_eq!(ids(&items), vec!["edu_1", "edu_2"]);
    assert_eq!(items[0]["score"], 100.0);
    assert_eq!(items[1]["score"], 33.3);
}

#[tokio::test]
async fn test_recommendations_pagination() {
    let server = create_test_server();
    server.post("/seed/videos").await.assert_status_ok();
    create_user(&server, json!({"id": "u1", "name": "Sam"})).await;

    let items: Vec<Value> = server
        .get("/recommendations/u1")
        .add_query_param("page", 3)
        .add_query_param("page_size", 4)
        .await
        .json();

    // all scores tie, so catalog order holds
    assert_eq!(ids(&items), vec!["fit_1", "calm_1"]);
}

#[tokio::test]
async fn test_recommendations_validation() {
    let server = create_test_server();
    create_user(&server, json!({"id": "u1", "name": "Sam"})).await;

    server
        .get("/recommendations/ghost")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/recommendations/u1")
        .add_query_param("limit", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/recommendations/u1")
        .add_query_param("limit", 101)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_meta() {
    let server = create_test_server();
    create_video(
        &server,
        json!({"id": "v1", "title": "Night", "tags": ["Horror", "thriller"], "mood": "Spooky"}),
    )
    .await;

    let meta: Value = server.get("/catalog/meta").await.json();

    assert_eq!(meta["tags"], json!(["horror", "thriller"]));
    assert_eq!(
        meta["moods"],
        json!(["adventurous", "calm", "cheerful", "energetic", "focused", "romance", "spooky"])
    );
}

#[tokio::test]
async fn test_sync_external_merges_new_videos() {
    let server = create_test_server_with(Some(vec![
        Video::new("ext_1", "Remote One").with_tags(["travel"]),
        Video::new("ext_2", "Remote Two"),
    ]));
    create_video(&server, json!({"id": "ext_1", "title": "Local"})).await;

    let outcome: Value = server.post("/sync/external").await.json();

    assert_eq!(outcome, json!({"fetched": 2, "added": 1}));
    let local: Value = server.get("/videos/ext_1").await.json();
    assert_eq!(local["title"], "Local");
}

#[tokio::test]
async fn test_sync_external_failure_is_empty() {
    let server = create_test_server_with(None);

    let response = server.post("/sync/external").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"fetched": 0, "added": 0}));
}
