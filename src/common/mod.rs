//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type and the text helpers used by
//! both the expression extractor and the quantity inference heuristics.

// Submodule declarations
pub mod error;
pub mod text;

// Re-exports for convenience
pub use error::{Error, Result};
pub use text::{collapse_whitespace, might_contain_math};
