//! Shared service plumbing for Mol: health probes, request ids, tracing,
//! environment configuration and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
