//! # Grantees
//!
//! A grantee (user) holds one access mask per right type. A grantee either
//! has a row with some masks, or does not exist at all; absence resolves to
//! "no access" everywhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::mask::AccessMask;
use crate::rights::{RightType, RightTypeSet};

/// Store-allocated grantee identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One grantee row: a user and their per-right-type masks.
///
/// # Example
///
/// ```
/// use acl_core::{AccessMask, Grantee, RightType, UserId};
///
/// let mut adam = Grantee::new(UserId::new(1), "Adam");
/// adam.set_mask(RightType::new("search"), AccessMask::new(2));
/// assert_eq!(adam.mask(&RightType::new("search")), Some(AccessMask::new(2)));
/// assert_eq!(adam.mask(&RightType::new("addressbook")), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grantee {
    /// Unique grantee id.
    pub id: UserId,

    /// Human-readable name.
    pub name: String,

    /// One mask per right type.
    pub masks: BTreeMap<RightType, AccessMask>,
}

impl Grantee {
    /// Create a grantee row with no masks yet.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            masks: BTreeMap::new(),
        }
    }

    /// Look up the mask for one right type.
    pub fn mask(&self, right_type: &RightType) -> Option<AccessMask> {
        self.masks.get(right_type).copied()
    }

    /// Set the mask for one right type, leaving the others untouched.
    pub fn set_mask(&mut self, right_type: RightType, mask: AccessMask) {
        self.masks.insert(right_type, mask);
    }

    /// Check whether this grantee holds exactly `mask` on **every** right
    /// type of the set.
    ///
    /// This is the cross-right-type propagation predicate: a grantee whose
    /// mask equals the full-access sum on every right type simultaneously
    /// inherits a newly created resource on all of them. A right type with
    /// no stored mask never matches.
    pub fn has_uniform_mask(&self, right_types: &RightTypeSet, mask: AccessMask) -> bool {
        !right_types.is_empty()
            && right_types
                .iter()
                .all(|rt| self.mask(rt) == Some(mask))
    }
}
