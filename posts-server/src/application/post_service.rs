use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::data::post_repository::{PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest, sort_newest_first};
use crate::infrastructure::id_generator::IdGenerator;

pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl PostService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let content = req.validate().inspect_err(|err| {
            if let DomainError::Validation { field, .. } = err {
                debug!(field, "create rejected");
            }
        })?;

        let post = Post::new(self.ids.generate(), Utc::now(), content);
        self.repo.insert(post.clone()).await?;
        Ok(post)
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.repo.scan_all().await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    pub(crate) async fn list_posts_by_number(&self, number: &str) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.repo.scan_limited(number).await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    pub(crate) async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        self.repo
            .get_by_key(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))
    }

    /// No field validation and no not-found mapping: a missing record
    /// surfaces as the backend's conditional-check failure.
    pub(crate) async fn update_post(
        &self,
        id: &str,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let patch = PostPatch {
            title: req.title,
            body: req.body,
        };
        Ok(self.repo.conditional_update(id, patch).await?)
    }

    pub(crate) async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        Ok(self.repo.delete_by_key(id).await?)
    }
}
