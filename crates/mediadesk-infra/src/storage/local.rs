//! Local-filesystem object store.
//!
//! Blobs land under `{root}/{key}` and are served back as
//! `{public_base}/{key}`. Keys are hierarchical; one directory per post.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use mediadesk_core::error::StorageError;
use mediadesk_core::ports::ObjectStore;

pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Keys come from the pipeline's sanitizer, but a traversal check at
    /// the boundary costs nothing.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(StorageError::Write(format!("invalid object key: {key}")));
        }
        Ok(self.root.join(Path::new(key)))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Write(e.to_string()))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;

        tracing::debug!(key = %key, size = bytes.len(), "object written");
        Ok(format!("{}/{}", self.public_base, key))
    }
}
