//! Unified error types for texquant.
//!
//! This module provides the crate-wide error type used by configuration
//! loading, document input and the proxy fetch chain.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
