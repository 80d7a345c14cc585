//! Error types for grant engine operations
//!
//! An unknown right type is an invalid argument and never silently resolves
//! to an empty result; an unknown user id is not an error at all and
//! resolves to "no access". Storage failures roll the enclosing transaction
//! back and surface unchanged; the engine never retries.

use thiserror::Error;

use acl_store::StoreError;

/// Grant engine error types.
#[derive(Debug, Error)]
pub enum AclError {
    /// The requested right type is outside the engine's closed set
    #[error("Unknown right type: {0}")]
    UnknownRightType(String),

    /// The storage collaborator failed; the operation was rolled back
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for grant engine operations.
pub type AclResult<T> = Result<T, AclError>;
