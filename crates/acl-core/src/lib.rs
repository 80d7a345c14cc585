//! # ACL Core
//!
//! This crate provides the bitmask access model shared by the village grant
//! crates: weights, masks, right types, and the grant-request normalization
//! algorithm. It is pure: no I/O, no storage, no async.
//!
//! ## Overview
//!
//! The acl-core crate handles:
//! - **Weights**: Each resource ("village") owns one unique power-of-two bit
//! - **Masks**: Per-user, per-right-type integer bitmasks over those bits
//! - **Right types**: A closed, configurable set of right kinds
//! - **Requests**: Sparse caller-supplied grant forms and their normalization
//!
//! ## Architecture
//!
//! ```text
//! Weight   = 2^(count + 1)             assigned in creation order, no gaps
//! Mask     = sum of a subset of weights
//! Full     = sum of ALL current weights ("access to everything")
//!
//! Examples (two resources, weights 2 and 4):
//!   mask 2   - first resource only
//!   mask 4   - second resource only
//!   mask 6   - full access
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use acl_core::{AccessMask, GrantRequest, ResourceId, RightType, RightTypeSet, Weight};
//!
//! let rights = RightTypeSet::new(["addressbook", "search"]);
//! let praha = ResourceId::new(1);
//! let brno = ResourceId::new(2);
//!
//! // Weight of the first resource (count 0 at creation time) is 2.
//! let w = Weight::for_count(0).unwrap();
//! assert_eq!(w.value(), 2);
//!
//! let mask = AccessMask::EMPTY.with(w);
//! assert!(mask.contains(w));
//!
//! // A completely blank form normalizes to unrestricted access.
//! let normalized = GrantRequest::new().normalize(&rights, &[praha, brno]);
//! assert!(normalized.is_allowed(&RightType::new("search"), brno));
//! ```
//!
//! ## Normalization rules
//!
//! The grant form a caller submits is sparse and partially specified. The
//! normalization algorithm completes it:
//! - A `false` leaf is identical to an absent leaf.
//! - A fully blank form means unrestricted access on every right type.
//! - A blank column for one right type means unrestricted access for that
//!   right type only.
//! - A right type omitted from the form entirely is a blank column, **not**
//!   a denial. Callers that want to restrict a right type must submit at
//!   least one `true` entry for it.

pub mod grantee;
pub mod mask;
pub mod request;
pub mod resource;
pub mod rights;

// Re-export main types for convenience
pub use grantee::{Grantee, UserId};
pub use mask::{AccessMask, Weight};
pub use request::GrantRequest;
pub use resource::{Resource, ResourceId};
pub use rights::{RightType, RightTypeSet};
