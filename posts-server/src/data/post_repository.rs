use async_trait::async_trait;

use crate::domain::error::StorageError;
use crate::domain::post::Post;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

/// Storage collaborator for posts. Every method is a single storage call.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Unconditional put: an existing record with the same id is replaced.
    async fn insert(&self, post: Post) -> Result<(), StorageError>;
    async fn scan_all(&self) -> Result<Vec<Post>, StorageError>;
    /// `limit` is interpreted by the backend, see [`parse_scan_limit`].
    async fn scan_limited(&self, limit: &str) -> Result<Vec<Post>, StorageError>;
    async fn get_by_key(&self, id: &str) -> Result<Option<Post>, StorageError>;
    /// Overwrites title and body of an existing record and returns the new
    /// record. Fails with a conditional-check error when `id` is absent.
    async fn conditional_update(&self, id: &str, patch: PostPatch) -> Result<Post, StorageError>;
    /// Succeeds whether or not the record existed.
    async fn delete_by_key(&self, id: &str) -> Result<(), StorageError>;
}

pub(crate) fn parse_scan_limit(raw: &str) -> Result<i64, StorageError> {
    let limit = raw.parse::<i64>().map_err(|_| {
        StorageError::validation(format!(
            "1 validation error detected: Value '{raw}' at 'limit' failed to satisfy constraint: \
             Member must be an integer"
        ))
    })?;

    if limit < 1 {
        return Err(StorageError::validation(format!(
            "1 validation error detected: Value '{limit}' at 'limit' failed to satisfy constraint: \
             Member must have value greater than or equal to 1"
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::parse_scan_limit;

    #[test]
    fn parse_scan_limit_accepts_positive_integers() {
        assert_eq!(parse_scan_limit("1").expect("valid"), 1);
        assert_eq!(parse_scan_limit("250").expect("valid"), 250);
    }

    #[test]
    fn parse_scan_limit_rejects_text() {
        let err = parse_scan_limit("ten").expect_err("must be rejected");
        assert_eq!(err.code, "ValidationException");
        assert_eq!(err.status_code, 400);
        assert!(err.message.contains("'ten'"));
    }

    #[test]
    fn parse_scan_limit_rejects_zero_and_negative() {
        assert!(parse_scan_limit("0").is_err());
        assert!(parse_scan_limit("-3").is_err());
    }
}
