//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod identity;
mod object_store;
mod repository;
mod transform;

pub use identity::IdentityVerifier;
pub use object_store::ObjectStore;
pub use repository::{AuditLogRepository, PostRepository};
pub use transform::{EncodedImage, ImageTransformer};
