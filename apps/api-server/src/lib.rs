//! # MediaDesk API Server
//!
//! Library surface for the HTTP server: configuration, shared state,
//! handlers, and middleware. The binary in `main.rs` wires these together;
//! integration tests build the same app from the same parts.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
