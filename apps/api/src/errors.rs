use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Callers see either an `error` or a `message` key depending on the case;
/// both shapes are part of the public contract.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// 404 reported under `error` (missing patient).
    #[error("Not found: {0}")]
    NotFound(String),

    /// 404 reported under `message` (lookup or scan came back empty).
    #[error("No data: {0}")]
    NoData(String),

    /// 500 whose detail text is echoed to the caller.
    #[error("{error}: {details}")]
    Internal { error: String, details: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(msg) | AppError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::NoData(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::Internal { error, details } => {
                tracing::error!("{error}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": error, "details": details }),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "A storage error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_conflict_is_bad_request_with_error_key() {
        let (status, body) = render(AppError::Conflict("taken".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "taken");
    }

    #[tokio::test]
    async fn test_no_data_uses_message_key() {
        let (status, body) = render(AppError::NoData("nothing".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "nothing");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_internal_echoes_details() {
        let (status, body) = render(AppError::Internal {
            error: "Failed to retrieve latest assessment".to_string(),
            details: "invalid digit found in string".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "invalid digit found in string");
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let (status, body) = render(AppError::Store(StoreError::EmptyHash("k".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "A storage error occurred");
    }
}
