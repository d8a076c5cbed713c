//! Cluster DNS routing primitives.
//!
//! This crate owns event decoding and the extraction rules that turn an ECS
//! state-change event plus cluster tags into DNS routing information. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod attachments;
pub mod attributes;
pub mod domain;
pub mod error;
pub mod event;
pub mod identifier;

pub use error::RoutingError;
