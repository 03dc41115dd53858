use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::post_repository::{PostPatch, PostRepository, parse_scan_limit};
use crate::domain::error::StorageError;
use crate::domain::post::Post;

/// Process-local backend. Scans return records in insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryPostRepository {
    items: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.id == post.id) {
            Some(existing) => *existing = post,
            None => items.push(post),
        }
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Post>, StorageError> {
        Ok(self.items.read().await.clone())
    }

    async fn scan_limited(&self, limit: &str) -> Result<Vec<Post>, StorageError> {
        let limit = usize::try_from(parse_scan_limit(limit)?).unwrap_or(usize::MAX);
        let items = self.items.read().await;
        Ok(items.iter().take(limit).cloned().collect())
    }

    async fn get_by_key(&self, id: &str) -> Result<Option<Post>, StorageError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn conditional_update(&self, id: &str, patch: PostPatch) -> Result<Post, StorageError> {
        let mut items = self.items.write().await;
        let existing = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(StorageError::conditional_check_failed)?;

        existing.title = patch.title;
        existing.body = patch.body;
        Ok(existing.clone())
    }

    async fn delete_by_key(&self, id: &str) -> Result<(), StorageError> {
        self.items.write().await.retain(|item| item.id != id);
        Ok(())
    }
}
