use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movieflix_core::error::CoreError;
use movieflix_core::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `movieflix_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::EmptyInput(msg) => (StatusCode::BAD_REQUEST, "EMPTY_FILE", msg.clone()),
                CoreError::DuplicateFile(msg) => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_FILE", msg.clone())
                }
                CoreError::InvalidSortField(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_SORT_FIELD", msg.clone())
                }
                CoreError::InvalidPageRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_PAGE_REQUEST", msg.clone())
                }
                CoreError::Store(StoreError::Duplicate(msg)) => {
                    (StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
                CoreError::Store(err) => {
                    tracing::error!(error = %err, "Record store error");
                    internal()
                }
                CoreError::Storage(msg) => {
                    tracing::error!(error = %msg, "Poster storage error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Sanitized 500 response parts; the detail only goes to the log.
fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
