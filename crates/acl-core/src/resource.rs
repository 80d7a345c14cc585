//! # Resources
//!
//! A resource ("village") is one entry of the growable set grants range
//! over. Resources are created once, never mutated and never deleted, and
//! each one owns a unique power-of-two weight assigned at creation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mask::Weight;

/// Store-allocated resource identifier, ascending in creation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
    /// Wrap a raw id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resource of the growable set.
///
/// # Example
///
/// ```
/// use acl_core::{Resource, ResourceId, Weight};
///
/// let praha = Resource::new(ResourceId::new(1), "Praha", Weight::for_count(0).unwrap());
/// assert_eq!(praha.weight.value(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// Unique resource id.
    pub id: ResourceId,

    /// Human-readable name (uniqueness not required).
    pub name: String,

    /// The unique power-of-two weight assigned at creation.
    pub weight: Weight,
}

impl Resource {
    /// Create a resource row.
    pub fn new(id: ResourceId, name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id,
            name: name.into(),
            weight,
        }
    }
}
