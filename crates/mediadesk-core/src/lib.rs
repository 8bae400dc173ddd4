//! # MediaDesk Core
//!
//! The domain layer of the MediaDesk backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post/media/audit entities, file validation rules, the upload pipeline,
//! and the authorization gate, all expressed over ports that infrastructure
//! implements.

pub mod domain;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod ports;
pub mod validate;

pub use gate::AuthorizationGate;
pub use pipeline::UploadPipeline;
