//! Configuration module for snapshot embedding
//!
//! This module provides the `EmbedOptions` struct and its builder. The options
//! are opaque to the embedding pipeline and consumed only by the fetch and
//! CSS resolution collaborators.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::EmbedOptionsBuilder;
pub use types::EmbedOptions;
