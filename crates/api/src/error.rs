use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promo_core::error::CoreError;
use promo_core::generation::GenerationError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`GenerationError`] for failed
/// generations, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `promo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A generation attempt that produced no artifact.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
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
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Generation outcomes ---
            AppError::Generation(err) => classify_generation_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a generation failure into an HTTP status, error code, and message.
///
/// Assembly failures keep the underlying error text so the operator can see
/// what went wrong in the encoder.
fn classify_generation_error(err: &GenerationError) -> (StatusCode, &'static str, String) {
    let status = match err {
        GenerationError::MissingInput(_) => StatusCode::BAD_REQUEST,
        GenerationError::SynthesisUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        GenerationError::AssemblyFailed(msg) => {
            tracing::error!(error = %msg, "Promo assembly failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.code(), err.to_string())
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use promo_core::request::MissingInput;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_input_is_bad_request() {
        let (status, body) = render(GenerationError::from(MissingInput::Script).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_INPUT");
        assert_eq!(body["error"], "Please enter a script");
    }

    #[tokio::test]
    async fn synthesis_unavailable_is_503() {
        let err = GenerationError::SynthesisUnavailable("disabled".into());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SYNTHESIS_UNAVAILABLE");
    }

    #[tokio::test]
    async fn assembly_failure_keeps_detail() {
        let (status, body) = render(GenerationError::assembly("exit code 1").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "ASSEMBLY_FAILED");
        assert_eq!(body["error"], "Error creating video: exit code 1");
    }

    #[tokio::test]
    async fn internal_core_error_is_sanitized() {
        let (status, body) = render(CoreError::Internal("secret path".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[tokio::test]
    async fn internal_error_is_sanitized() {
        let (status, body) =
            render(AppError::InternalError("task panicked at mascot.rs".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], "An internal error occurred");
    }
}
