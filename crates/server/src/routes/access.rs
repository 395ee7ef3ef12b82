use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use common::types::WriteAck;
use serde::Deserialize;
use serde_json::Value;
use service::access::WriteMode;
use service::store::Collection;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct WriteParams {
    pub mode: Option<String>,
}

/// POST /api/access
///
/// Upserts the body's access items by `(user_id, project_id)`;
/// `?mode=replace` swaps the whole collection instead.
pub async fn write_access(
    State(state): State<ServerState>,
    Query(params): Query<WriteParams>,
    body: Bytes,
) -> Result<Json<WriteAck>, JsonApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| JsonApiError::bad_request(format!("Body is not valid JSON: {e}")))?;
    let mode = WriteMode::from_query(params.mode.as_deref());

    state
        .access
        .apply(body, mode)
        .await
        .map(|outcome| Json(WriteAck::ok(outcome.count)))
        .map_err(|e| JsonApiError::from_store(e, Collection::Access, "write"))
}
