//! # MediaDesk Infrastructure
//!
//! Concrete implementations of the ports defined in `mediadesk-core`:
//! raster image derivations, object storage backends, document
//! repositories, and identity verification.

pub mod auth;
pub mod repository;
pub mod storage;
pub mod transform;

pub use auth::{JwtConfig, JwtIdentityVerifier};
pub use repository::{InMemoryAuditLogRepository, InMemoryPostRepository};
pub use storage::{InMemoryObjectStore, LocalObjectStore};
pub use transform::RasterTransformer;
