//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkwell_core::domain::{self, Post, PostFields};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, PostRepository};

/// Post repository backed by a `BTreeMap` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<BTreeMap<i64, Post>>,
    last_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(BTreeMap::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let term = term.filter(|t| !t.is_empty());
        let posts = self.posts.read().await;

        let mut result: Vec<Post> = posts
            .values()
            .filter(|post| term.is_none_or(|t| post.matches(t)))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let post = Post::create(id, fields, domain::now());

        self.posts.write().await.insert(id, post.clone());
        tracing::debug!(post_id = id, "Post created (in-memory)");
        Ok(post)
    }

    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.overwrite(fields, domain::now());
        tracing::debug!(post_id = id, "Post updated (in-memory)");
        Ok(post.clone())
    }
}
