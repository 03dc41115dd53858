use crate::domain::error::DomainError;
use crate::presentation::http::response::{ApiResponse, response};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mapped = match self {
            AppError::Domain(DomainError::Storage(err)) => {
                warn!(
                    code = %err.code,
                    status = err.status_code,
                    "storage call failed: {}",
                    err.message
                );
                response(err.status_code, &err)
            }
            AppError::Domain(err @ DomainError::Validation { .. }) => {
                error_body(StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Domain(err @ DomainError::NotFound(_)) => {
                error_body(StatusCode::NOT_FOUND, err.to_string())
            }
            AppError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => error_body(StatusCode::NOT_FOUND, "not found".to_string()),
        };

        mapped.into_response()
    }
}

fn error_body(status: StatusCode, error: String) -> ApiResponse {
    response(status.as_u16(), &ErrorBody { error })
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::AppError;
    use crate::domain::error::{DomainError, StorageError};
    use crate::domain::post::MISSING_FIELDS_MESSAGE;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = serde_json::from_slice(&bytes).expect("body must be json");
        (status, body)
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_fixed_message() {
        let (status, body) = render(AppError::Domain(DomainError::Validation {
            field: "title",
            message: MISSING_FIELDS_MESSAGE,
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Post must have title and body" }));
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_error_only() {
        let (status, body) = render(AppError::Domain(DomainError::NotFound("Post"))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Post not found" }));
    }

    #[tokio::test]
    async fn storage_error_is_forwarded_verbatim() {
        let err =
            StorageError::new("ProvisionedThroughputExceededException", "slow down", 429, true);
        let (status, body) = render(AppError::Domain(DomainError::Storage(err))).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body,
            json!({
                "message": "slow down",
                "code": "ProvisionedThroughputExceededException",
                "statusCode": 429,
                "retryable": true,
            })
        );
    }

    #[tokio::test]
    async fn bad_request_uses_error_body() {
        let (status, body) = render(AppError::BadRequest("broken json".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "broken json" }));
    }
}
