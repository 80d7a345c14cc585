//! Error types for storage operations
//!
//! This module defines all error types a storage backend can surface to the
//! grant engine. A failed operation inside a transaction rolls the whole
//! transaction back; no partial state is ever durable.

use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed (connection, statement, commit)
    #[error("Storage backend failure: {0}")]
    Backend(String),

    /// No further resource weight fits into the mask space
    #[error("Resource weight space exhausted")]
    WeightOverflow,
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
