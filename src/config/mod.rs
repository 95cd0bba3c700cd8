//! Configuration module for harvest runs
//!
//! This module provides the `HarvestConfig` struct and its type-safe builder.
//! Storage locations are explicit values rather than process-wide constants,
//! so tests can point each instance at its own temporary directory.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, HarvestConfigBuilder, WithSeenLog};
pub use types::HarvestConfig;
