use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marksheet_core::error::CoreError;
use marksheet_core::ingest::IngestError;
use serde_json::json;

/// Single message for every authentication failure, so callers cannot tell
/// which part of the credential was wrong.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing credentials";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`IngestError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marksheet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A batch ingestion failure.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The generic 401 used by login and the admin extractor.
    pub fn unauthorized() -> Self {
        AppError::Core(CoreError::Unauthorized(UNAUTHORIZED_MESSAGE.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Ingestion ---
            AppError::Ingest(IngestError::EmptyUpload) => (
                StatusCode::BAD_REQUEST,
                "EMPTY_UPLOAD",
                IngestError::EmptyUpload.to_string(),
            ),
            // Nothing was written; the store's message goes back to the uploader.
            AppError::Ingest(err @ IngestError::Store(_)) => {
                tracing::error!(error = %err, "Batch insert failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", err.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    internal()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_and_body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn empty_upload_is_a_client_error() {
        let (status, body) = status_and_body(AppError::Ingest(IngestError::EmptyUpload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_UPLOAD");
    }

    #[tokio::test]
    async fn store_failure_reports_the_cause() {
        let err = AppError::Ingest(IngestError::Store("connection reset by peer".into()));
        let (status, body) = status_and_body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_ERROR");
        assert_eq!(
            body["error"],
            "Failed to store results: connection reset by peer"
        );
    }

    #[tokio::test]
    async fn unauthorized_uses_the_generic_message() {
        let (status, body) = status_and_body(AppError::unauthorized()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], UNAUTHORIZED_MESSAGE);
    }

    #[tokio::test]
    async fn database_errors_are_sanitized() {
        let (status, body) = status_and_body(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
    }
}
