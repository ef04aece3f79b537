//! Core types for contract and wrapper generation
//!
//! This crate holds the read-only metadata surface the generators consume and
//! the error taxonomy shared by every stage.

pub mod error;
pub mod metadata;
pub mod reflection;

pub use error::*;
pub use metadata::*;
pub use reflection::{AssemblyMetadata, MetadataDiscovery, TypeMetadata};
