use async_trait::async_trait;

use crate::domain::{Post, PostFields};
use crate::error::RepoError;

/// Generic repository trait for lookups and removal by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when
    /// nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// All posts, newest first. A non-empty `term` restricts the result to
    /// posts whose title, content or category contains it, ignoring case.
    async fn list(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post with a server-assigned id and timestamps.
    async fn create(&self, fields: PostFields) -> Result<Post, RepoError>;

    /// Replace the writable fields of an existing post.
    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError>;
}
