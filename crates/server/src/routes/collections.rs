use axum::{extract::State, Json};
use service::storage::Record;
use service::store::Collection;

use crate::errors::JsonApiError;
use crate::state::ServerState;

async fn read_collection(state: &ServerState, collection: Collection) -> Result<Json<Vec<Record>>, JsonApiError> {
    state
        .store
        .load(collection)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_store(e, collection, "read"))
}

/// GET /api/access
pub async fn list_access(State(state): State<ServerState>) -> Result<Json<Vec<Record>>, JsonApiError> {
    state
        .access
        .list()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_store(e, Collection::Access, "read"))
}

/// GET /api/users
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<Record>>, JsonApiError> {
    read_collection(&state, Collection::Users).await
}

/// GET /api/projects
pub async fn list_projects(State(state): State<ServerState>) -> Result<Json<Vec<Record>>, JsonApiError> {
    read_collection(&state, Collection::Projects).await
}
