//! Error types for the explorer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the explorer.
///
/// Cache reads and writes never fail; only construction of the cache,
/// the HTTP fetcher and command argument handling produce errors.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache interval was zero
    #[error("Cache interval must be greater than zero")]
    InvalidInterval,

    /// Cache was constructed outside a Tokio runtime
    #[error("Cache must be created inside a Tokio runtime")]
    NoRuntime,

    /// A URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API base URL cannot carry path segments
    #[error("URL cannot be used as an API base: {0}")]
    InvalidBaseUrl(String),

    /// Transport-level HTTP failure (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Command was called with missing or extra arguments
    #[error("{0}")]
    InvalidArguments(String),

    /// Creature is not in the pokedex
    #[error("you have not caught {0}")]
    NotCaught(String),

    /// Writing command output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the explorer.
pub type Result<T> = std::result::Result<T, PokedexError>;
