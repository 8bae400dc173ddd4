//! Domain entities - the core business objects.

mod audit;

mod post;

pub use audit::{AuditAction, AuditLogEntry};
pub use post::{MediaItem, Platform, Post, PostPatch, PostStatus};
