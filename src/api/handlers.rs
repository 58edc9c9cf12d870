use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    engine::DEFAULT_LIMIT,
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MoodUpdate, NewInteraction, NewUser, NewVideo, User, UserUpdate, Video},
    services::{
        catalog::{self, CatalogMeta, VideoFilter},
        recommendations::{self, RecommendationParams, Recommendations},
        seed::{self, SeedOutcome},
        sync::{self, SyncOutcome},
    },
    store::Counts,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether an external catalog is configured
    pub env_loaded: bool,
    #[serde(flatten)]
    pub counts: Counts,
}

#[derive(Debug, Deserialize)]
pub struct ListVideosQuery {
    pub tag: Option<String>,
    pub mood: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub details: Option<bool>,
}

// Handlers

/// Health check with collection sizes
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let counts = state.repository.counts().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        env_loaded: state.config.external_catalog_enabled(),
        counts,
    }))
}

/// Create a new video
pub async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<NewVideo>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let video = state.repository.create_video(request.into()).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// List videos, optionally filtered by tag and mood
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<ListVideosQuery>,
) -> AppResult<Json<Vec<Video>>> {
    let filter = VideoFilter {
        tag: params.tag,
        mood: params.mood,
    };
    let videos = catalog::list_videos(
        state.repository.as_ref(),
        &filter,
        params.page.unwrap_or(1),
        params.page_size.unwrap_or(state.config.page_size_default),
    )
    .await?;
    Ok(Json(videos))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<Video>> {
    state
        .repository
        .get_video(&video_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<Value>> {
    state.repository.delete_video(&video_id).await?;
    Ok(Json(json!({ "deleted": true })))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.repository.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<User>> {
    state
        .repository
        .get_user(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Partially update a user; see [`UserUpdate`] for the field contract
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let user = state.repository.update_user(&user_id, update).await?;
    Ok(Json(user))
}

/// Set or clear a user's mood
pub async fn update_user_mood(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<MoodUpdate>,
) -> AppResult<Json<User>> {
    let user = state.repository.update_user(&user_id, update.into()).await?;
    Ok(Json(user))
}

/// Record a user interaction with a video
pub async fn record_interaction(
    State(state): State<AppState>,
    Json(request): Json<NewInteraction>,
) -> AppResult<Json<Value>> {
    state.repository.record_interaction(request.into()).await?;
    Ok(Json(json!({ "recorded": true })))
}

/// Recommend videos for a user
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Recommendations>> {
    let params = RecommendationParams {
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(state.config.page_size_default),
        details: query.details.unwrap_or(true),
    };

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        limit = params.limit,
        page = params.page,
        page_size = params.page_size,
        "Processing recommendation request"
    );

    let result =
        recommendations::recommend_for_user(state.repository.as_ref(), &user_id, params).await?;
    Ok(Json(result))
}

/// Seed the catalog with sample videos
pub async fn seed_videos(State(state): State<AppState>) -> AppResult<Json<SeedOutcome>> {
    let outcome = seed::seed_videos(state.repository.as_ref()).await?;
    Ok(Json(outcome))
}

/// Merge the external catalog into the local one
pub async fn sync_external(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<SyncOutcome>> {
    tracing::info!(request_id = %request_id, "Starting external catalog sync");

    let outcome =
        sync::sync_external(state.repository.as_ref(), state.catalog_provider.as_ref()).await?;
    Ok(Json(outcome))
}

/// Tags and moods for building pickers
pub async fn catalog_meta(State(state): State<AppState>) -> AppResult<Json<CatalogMeta>> {
    let videos = state.repository.list_videos().await?;
    Ok(Json(catalog::catalog_meta(&videos)))
}
