//! Error types for the state store.

use thiserror::Error;

/// Main error type for state store operations.
///
/// Lookups never produce an error: a missing or expired key is a `None`.
/// Errors only arise when building the typed inputs (keys, TTLs) from raw
/// caller values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid TTL: {0}ms (must be at least 1ms)")]
    InvalidTtl(u64),

    #[error("Invalid state key: {0:?}")]
    InvalidKey(String),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StateError>;
