use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuditLogEntry, Post, PostPatch};
use crate::error::RepoError;

/// Post document repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts, ordered by creation time descending.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post document.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Merge-update: only fields present in the patch change, `updated_at`
    /// is always refreshed. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete a post by its ID. Lock enforcement is the caller's job.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Append-only audit log repository.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one entry. Entries are never updated or deleted.
    async fn append(&self, entry: AuditLogEntry) -> Result<(), RepoError>;

    /// Most recent entries, newest first, up to `limit`.
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, RepoError>;
}
