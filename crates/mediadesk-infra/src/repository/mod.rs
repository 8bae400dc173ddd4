//! Document repositories for posts and the audit trail.

mod memory;

pub use memory::{InMemoryAuditLogRepository, InMemoryPostRepository};
