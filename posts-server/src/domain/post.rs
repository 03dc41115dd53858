use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use super::error::DomainError;

/// Owner assigned to every created post.
pub(crate) const DEFAULT_USER_ID: i64 = 1;

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Post must have title and body";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) user_id: i64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

impl Post {
    pub(crate) fn new(id: impl Into<String>, created_at: DateTime<Utc>, content: PostContent) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.trunc_subsecs(3),
            user_id: DEFAULT_USER_ID,
            title: Some(content.title),
            body: Some(content.body),
        }
    }
}

/// Title and body that passed create-time validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostContent {
    pub(crate) title: String,
    pub(crate) body: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

impl CreatePostRequest {
    /// Rejects absent or blank fields, title first. Accepted values are kept
    /// untrimmed.
    pub(crate) fn validate(self) -> Result<PostContent, DomainError> {
        let title = require_non_blank("title", self.title)?;
        let body = require_non_blank("body", self.body)?;
        Ok(PostContent { title, body })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

fn require_non_blank(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DomainError::Validation {
            field,
            message: MISSING_FIELDS_MESSAGE,
        }),
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Newest first. Equal timestamps keep their input order.
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
