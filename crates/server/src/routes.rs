pub mod access;
pub mod collections;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use configs::StorageConfig;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: JSON API, health, and static files from the data root.
pub fn build_router(state: ServerState, cors: CorsLayer, storage: &StorageConfig) -> Router {
    // `/` always answers with the entry HTML; any other path is looked up under the data root
    let index = ServeFile::new(storage.index_path());
    let static_dir = ServeDir::new(&storage.root_dir);

    // JSON collection routes; the body limit only covers these
    let api = Router::new()
        .route("/api/access", get(collections::list_access).post(access::write_access))
        .route("/api/users", get(collections::list_users))
        .route("/api/projects", get(collections::list_projects))
        .layer(DefaultBodyLimit::max(storage.body_limit_bytes));

    // Compose
    Router::new()
        .route("/health", get(health))
        .merge(api)
        .route_service("/", index)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path, no headers
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // request received
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response sent, with status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
