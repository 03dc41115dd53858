use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

const SERIALIZE_FAILURE_BODY: &str = r#"{"error":"failed to serialize response"}"#;

/// Transport-level response: a status code plus the JSON text of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiResponse {
    pub(crate) status_code: u16,
    pub(crate) body: String,
}

pub(crate) fn response<T>(status_code: u16, payload: &T) -> ApiResponse
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(payload) {
        Ok(body) => ApiResponse { status_code, body },
        Err(err) => {
            error!(error = %err, status_code, "failed to serialize response payload");
            ApiResponse {
                status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                body: SERIALIZE_FAILURE_BODY.to_string(),
            }
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}
