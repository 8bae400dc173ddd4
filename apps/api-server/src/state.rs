//! Application state - shared across all handlers.

use std::sync::Arc;

use mediadesk_core::gate::AuthorizationGate;
use mediadesk_core::pipeline::UploadPipeline;
use mediadesk_core::ports::{AuditLogRepository, PostRepository};
use mediadesk_infra::auth::JwtIdentityVerifier;
use mediadesk_infra::repository::{InMemoryAuditLogRepository, InMemoryPostRepository};
use mediadesk_infra::storage::LocalObjectStore;
use mediadesk_infra::transform::RasterTransformer;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub audit: Arc<dyn AuditLogRepository>,
    pub pipeline: Arc<UploadPipeline>,
    pub gate: Arc<AuthorizationGate>,
}

impl AppState {
    /// Build the application state with the default implementations:
    /// in-memory document repositories, local-filesystem object store,
    /// raster transformer, and a JWT identity verifier configured from the
    /// environment.
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(LocalObjectStore::new(
            &config.upload_dir,
            &config.public_base,
        ));
        let pipeline = Arc::new(UploadPipeline::new(store, Arc::new(RasterTransformer::new())));

        let verifier = Arc::new(JwtIdentityVerifier::from_env());
        let gate = Arc::new(AuthorizationGate::new(
            verifier,
            config.authorized_emails.clone(),
        ));

        tracing::info!(
            allowed = config.authorized_emails.len(),
            upload_dir = %config.upload_dir,
            "Application state initialized"
        );

        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            audit: Arc::new(InMemoryAuditLogRepository::new()),
            pipeline,
            gate,
        }
    }
}
