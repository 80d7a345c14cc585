//! # ACL Store
//!
//! Storage abstraction for the village grant system. The grant engine never
//! needs to know storage is relational; it needs only the operations this
//! crate's traits expose: atomic reads of the current resource set, row
//! upserts, multi-row conditional updates under one transaction, and
//! store-side id and weight allocation.
//!
//! ## Overview
//!
//! The acl-store crate handles:
//! - **Resource rows**: id, name, and the assigned power-of-two weight
//! - **Grantee rows**: id, name, and one mask per right type
//! - **Transactions**: the atomic unit a resource-creation event runs in
//!
//! ## Backends
//!
//! The in-memory backend ([`memory::MemoryStore`], default `memory`
//! feature) is suitable for single-process applications and testing. A
//! relational backend would implement the same two traits; all bit logic
//! stays out of this layer, which only ever stores and compares plain
//! masks.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acl_core::AccessMask;
//! use acl_store::memory::MemoryStore;
//! use acl_store::{GrantStore, StoreResult};
//!
//! # async fn demo() -> StoreResult<()> {
//! let store = MemoryStore::new();
//!
//! let mut tx = store.begin().await?;
//! let praha = tx.insert_resource("Praha").await?;
//! tx.commit().await?;
//!
//! assert_eq!(praha.weight.value(), 2);
//! assert_eq!(store.full_access_mask().await?, AccessMask::new(2));
//! # Ok(())
//! # }
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod store;

// Re-export main types for convenience
pub use error::{StoreError, StoreResult};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use store::{GrantStore, GrantTransaction};
