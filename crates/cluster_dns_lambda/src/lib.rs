//! AWS-oriented adapters and handlers for cluster DNS routing.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! orchestration-service boundary, and environment configuration). Extraction
//! rules live in `cluster_dns_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
