use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use stockroom_blob::BlobError;
use stockroom_inventory::InventoryError;

/// Errors from starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("blob store error: {0}")]
    Blob(#[from] BlobError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error returned from a request handler, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Storage(String),

    #[error("method not allowed")]
    MethodNotAllowed,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::NotFound(id) => Self::NotFound(format!("item not found: {id}")),
            InventoryError::Validation(msg) => Self::Validation(msg),
            InventoryError::Blob(blob) => blob.into(),
        }
    }
}

impl From<BlobError> for ApiError {
    fn from(e: BlobError) -> Self {
        match e {
            BlobError::NotFound(_) => Self::NotFound("photo not found".into()),
            other => {
                tracing::error!(error = %other, "photo storage failure");
                Self::Storage("failed to store photo".into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_blob::BlobRef;
    use stockroom_inventory::ItemId;

    #[test]
    fn inventory_errors_map_to_status() {
        let nf: ApiError = InventoryError::NotFound(ItemId::generate()).into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);

        let bad: ApiError = InventoryError::Validation("name is required".into()).into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.to_string(), "name is required");
    }

    #[test]
    fn missing_blob_is_not_found_but_write_failure_is_500() {
        let missing: ApiError = BlobError::NotFound(BlobRef::generate()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let failed: ApiError = InventoryError::Blob(BlobError::Storage {
            blob: BlobRef::generate(),
            source: std::io::Error::other("disk full"),
        })
        .into();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Storage details stay in the logs.
        assert!(!failed.to_string().contains(".blob"));
    }

    #[test]
    fn payload_too_large_status() {
        let err = ApiError::PayloadTooLarge("request body too large".into());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn method_not_allowed_status() {
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
