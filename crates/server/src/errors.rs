use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::StoreError;
use service::store::Collection;
use thiserror::Error;
use tracing::error;

/// JSON error body `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into() }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Map a store failure for `collection`. Validation problems go back to
    /// the caller verbatim; disk problems are logged and hidden behind a
    /// generic message.
    pub fn from_store(err: StoreError, collection: Collection, action: &str) -> Self {
        match err {
            StoreError::Validation(msg) => Self::bad_request(msg),
            other => {
                let file = collection.file_name();
                error!(error = %other, file, action, "collection i/o failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to {action} {file}"))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.error}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_message() {
        let e = JsonApiError::from_store(StoreError::validation("Body must be an array of access items"), Collection::Access, "write");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.error, "Body must be an array of access items");
    }

    #[test]
    fn io_maps_to_500_with_generic_message() {
        let err = StoreError::read(std::path::Path::new("/srv/users.json"), "expected value at line 1");
        let e = JsonApiError::from_store(err, Collection::Users, "read");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.error, "Failed to read users.json");
    }
}
