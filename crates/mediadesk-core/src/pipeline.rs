//! Upload pipeline - validate, derive, persist, report.
//!
//! Per-file state machine: `pending -> uploading -> {completed | failed}`,
//! terminal states final for the attempt. A successful run produces exactly
//! one [`MediaItem`]; a failed run produces none. Bytes already written
//! before a failure are not rolled back (known gap, reconciled out of band).

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::MediaItem;
use crate::error::{StorageError, TransformError};
use crate::ports::{ImageTransformer, ObjectStore};
use crate::validate::{FileCandidate, validate_file};

/// Upload state for one file attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Failed,
}

/// Progress report delivered to the caller's callback. Progress values are
/// milestone checkpoints, monotonic until a terminal state; a failure
/// resets the reported progress to 0.
#[derive(Debug, Clone)]
pub struct UploadProgress {
    pub file_name: String,
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
}

/// One file handed to the pipeline: declared name and MIME type plus the
/// actual bytes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Per-run options shared by every file in a batch.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub post_id: Uuid,
    pub uploaded_by: String,
    /// When false, the thumbnail URL aliases the file URL and no derived
    /// bytes are persisted.
    pub thumbnail: bool,
}

/// Why a single upload attempt failed. Validation reasons go back to the
/// caller verbatim; storage detail is logged, not leaked.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Progress callback type. Invoked at each milestone and on terminal
/// transitions, keyed by file name.
pub type ProgressFn<'a> = dyn Fn(UploadProgress) + Send + Sync + 'a;

///// Orchestrates one upload: validate -> compress -> thumbnail -> persist
/// original -> persist thumbnail -> report. Sequential by design; the
/// batch path fully awaits each file before starting the next.
pub struct UploadPipeline {
    store: Arc<dyn ObjectStore>,
    transformer: Arc<dyn ImageTransformer>,
}

impl UploadPipeline {
    pub fn new(store: Arc<dyn ObjectStore>, transformer: Arc<dyn ImageTransformer>) -> Self {
        Self { store, transformer }
    }

    /// Upload one file for a post. At most one `MediaItem` per successful
    /// run; on failure the caller gets the error and no partial record.
    pub async fn upload(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> Result<MediaItem, UploadError> {
        let file_name = file.name.clone();
        match self.run(file, options, on_progress).await {
            Ok(item) => {
                report(on_progress, &file_name, 100, UploadStatus::Completed, None);
                Ok(item)
            }
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "upload failed");
                report(
                    on_progress,
                    &file_name,
                    0,
                    UploadStatus::Failed,
                    Some(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Upload a batch strictly sequentially. One file's failure does not
    /// abort the rest; results come back in input order.
    pub async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        options: &UploadOptions,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> Vec<Result<MediaItem, UploadError>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.upload(file, options, on_progress).await);
        }
        results
    }

    async fn run(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> Result<MediaItem, UploadError> {
        report(on_progress, &file.name, 0, UploadStatus::Uploading, None);

        // Re-check of the advisory client-side rules at the upload boundary;
        // nothing is written before this passes.
        let candidate = FileCandidate::new(&file.name, file.bytes.len() as u64, &file.mime_type);
        validate_file(&candidate).map_err(UploadError::Validation)?;

        report(on_progress, &file.name, 10, UploadStatus::Uploading, None);
        let compressed = self.transformer.compress(&file.bytes, &file.mime_type)?;
        report(on_progress, &file.name, 30, UploadStatus::Uploading, None);

        let thumb = if options.thumbnail {
            Some(self.transformer.thumbnail(&compressed.bytes)?)
        } else {
            None
        };

        let object_name = object_name(&file.name);
        let file_key = format!("{}/{}", options.post_id, object_name);
        let file_url = self
            .store
            .put(&file_key, &compressed.bytes, &compressed.mime_type)
            .await?;

        let thumbnail_url = match thumb {
            Some(thumb) => {
                let thumb_key = format!("{}/thumb-{}", options.post_id, object_name);
                self.store
                    .put(&thumb_key, &thumb.bytes, &thumb.mime_type)
                    .await?
            }
            None => file_url.clone(),
        };

        report(on_progress, &file.name, 90, UploadStatus::Uploading, None);

        Ok(MediaItem {
            file_name: file.name,
            file_url,
            thumbnail_url,
            file_size: compressed.bytes.len() as u64,
            mime_type: compressed.mime_type,
            uploaded_by: options.uploaded_by.clone(),
            uploaded_at: Utc::now(),
        })
    }
}

fn report(
    on_progress: Option<&ProgressFn<'_>>,
    file_name: &str,
    progress: u8,
    status: UploadStatus,
    error: Option<String>,
) {
    if let Some(callback) = on_progress {
        callback(UploadProgress {
            file_name: file_name.to_string(),
            progress,
            status,
            error,
        });
    }
}

/// Collision-resistant, path-safe object name: millisecond timestamp plus
/// the sanitized original name.
fn object_name(original: &str) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), sanitize(original))
}

/// Replace anything outside `[A-Za-z0-9.-]` with an underscore.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
