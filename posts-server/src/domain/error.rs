use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure reported by a storage backend. Serialized as-is into the
/// response body, with `status_code` becoming the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub(crate) struct StorageError {
    pub(crate) message: String,
    pub(crate) code: String,
    pub(crate) status_code: u16,
    pub(crate) retryable: bool,
}

impl StorageError {
    pub(crate) fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
        retryable: bool,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            status_code,
            retryable,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new("ValidationException", message, 400, false)
    }

    pub(crate) fn conditional_check_failed() -> Self {
        Self::new(
            "ConditionalCheckFailedException",
            "The conditional request failed",
            400,
            false,
        )
    }

    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        Self::new("ServiceUnavailable", message, 503, true)
    }

    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self::new("DatabaseError", message, 400, false)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new("InternalServerError", message, 500, false)
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainError, StorageError};

    #[test]
    fn not_found_renders_entity_name() {
        let err = DomainError::NotFound("Post");
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn storage_error_serializes_with_camel_case_fields() {
        let err = StorageError::conditional_check_failed();
        let value = serde_json::to_value(&err).expect("must serialize");

        assert_eq!(value["code"], "ConditionalCheckFailedException");
        assert_eq!(value["message"], "The conditional request failed");
        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["retryable"], false);
    }

    #[test]
    fn unavailable_is_retryable() {
        let err = StorageError::unavailable("pool timed out");
        assert_eq!(err.status_code, 503);
        assert!(err.retryable);
    }
}
