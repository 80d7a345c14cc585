//! # ACL Engine
//!
//! The grant engine for the village grant system: it resolves stored masks
//! back into resource lists, completes sparse grant forms, and keeps
//! "had access to everything" meaning everything as the resource set grows.
//!
//! ## Overview
//!
//! The acl-engine crate handles:
//! - **Resolution**: mask → ordered list of granted resources
//! - **Normalization**: sparse caller grant forms → complete masks
//! - **Propagation**: updating every grantee when a resource is created
//! - **Creation**: resources (with propagation) and users (born with full
//!   access)
//!
//! ## Architecture
//!
//! ```text
//! GrantEngine ──▶ ResourceRegistry ──▶ GrantStore (acl-store)
//!      │                                    ▲
//!      └────────────────────────────────────┘
//!
//! create_resource  one transaction: insert + two propagation passes
//! apply            normalize, fold weights into masks, one atomic write
//! get              read mask, intersect with the resource list
//! ```
//!
//! ## Propagation
//!
//! Adding a resource never rewrites every grant row by hand. Inside one
//! transaction the engine takes the full-access sum before and after the
//! insert and runs two ordered passes: grantees at the old sum on every
//! right type move to the new sum everywhere, then, per right type,
//! grantees at the old sum on that right type alone move to the new sum
//! there. Partial-access grantees never auto-gain new resources.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use acl_core::{GrantRequest, RightType, RightTypeSet};
//! use acl_engine::{AclResult, GrantEngine};
//! use acl_store::MemoryStore;
//!
//! # async fn demo() -> AclResult<()> {
//! let engine = GrantEngine::new(
//!     Arc::new(MemoryStore::new()),
//!     RightTypeSet::new(["addressbook", "search"]),
//! );
//!
//! let praha = engine.create_resource("Praha").await?;
//! let brno = engine.create_resource("Brno").await?;
//!
//! let adam = engine.create_user("Adam").await?;
//! let form = GrantRequest::new()
//!     .with(RightType::new("addressbook"), praha, true)
//!     .with(RightType::new("addressbook"), brno, false);
//! engine.apply(adam, &form).await?;
//!
//! let granted = engine.get(adam, &RightType::new("addressbook")).await?;
//! assert_eq!(granted.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod registry;

// Re-export main types for convenience
pub use engine::GrantEngine;
pub use error::{AclError, AclResult};
pub use registry::ResourceRegistry;
