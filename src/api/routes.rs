use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route(
            "/videos",
            get(handlers::list_videos).post(handlers::create_video),
        )
        .route(
            "/videos/:video_id",
            get(handlers::get_video).delete(handlers::delete_video),
        )
        .route("/catalog/meta", get(handlers::catalog_meta))
        .route("/seed/videos", post(handlers::seed_videos))
        .route("/sync/external", post(handlers::sync_external))
        // Users
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:user_id",
            get(handlers::get_user).patch(handlers::update_user),
        )
        .route("/users/:user_id/mood", patch(handlers::update_user_mood))
        // Interactions and recommendations
        .route("/interactions", post(handlers::record_interaction))
        .route("/recommendations/:user_id", get(handlers::recommend))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
