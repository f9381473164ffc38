//! Unified error types for texquant.
//!
//! The analyzer itself never fails. These errors cover the edges around it:
//! configuration loading, document I/O and the proxy fetch chain.
use thiserror::Error;

/// Main error type for texquant operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL rejected before any request was made
    #[error("Invalid URL: {0} does not start with http(s)://")]
    InvalidUrl(String),

    /// A single fetch attempt failed
    #[error("Fetch failed: {status} {message}")]
    Fetch { status: u16, message: String },

    /// Transport-level failure (connection refused, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Every proxy in the chain failed; carries the last failure
    #[error("All {attempts} proxies failed, last error: {last}")]
    AllProxiesFailed { attempts: usize, last: Box<Error> },

    /// Proxy answered with an empty body
    #[error("Empty response from proxy")]
    EmptyResponse,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for texquant operations.
pub type Result<T> = std::result::Result<T, Error>;
