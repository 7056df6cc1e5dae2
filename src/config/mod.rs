//! Configuration module for the output stage
//!
//! This module provides the `OutputConfig` struct, its type-safe builder,
//! and the budget values derived from it.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{OutputConfigBuilder, WithStartUrl, load_configs};
pub use types::{OutputBudget, OutputConfig, OutputFormat};
