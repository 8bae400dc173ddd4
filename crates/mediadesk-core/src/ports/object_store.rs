use async_trait::async_trait;

use crate::error::StorageError;

/// Binary object store: named byte blobs under a hierarchical key,
/// addressable by a retrieval URL after a successful write.
///
/// Writes are not transactional with the document store; a failed
/// follow-up store update leaves the blob in place.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `bytes` under `key`, returning the retrieval URL.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str)
    -> Result<String, StorageError>;
}
