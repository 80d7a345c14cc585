//! # Right types
//!
//! A right type is one kind of permission a grantee can hold on resources
//! (the reference deployment uses two: "addressbook" and "search"). The set
//! of right types is closed and configured at engine construction; there is
//! no process-wide constant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one right type.
///
/// # Example
///
/// ```
/// use acl_core::rights::RightType;
///
/// let rt = RightType::new("addressbook");
/// assert_eq!(rt.as_str(), "addressbook");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RightType(String);

impl RightType {
    /// Create a right type from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name of this right type.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RightType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The closed set of right types an engine operates over.
///
/// Ordered (construction order) and duplicate-free. Every engine operation
/// that takes a right type validates it against this set.
///
/// # Example
///
/// ```
/// use acl_core::rights::{RightType, RightTypeSet};
///
/// let set = RightTypeSet::new(["addressbook", "search"]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&RightType::new("search")));
/// assert!(!set.contains(&RightType::new("invoices")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RightTypeSet {
    /// The right types, in construction order.
    types: Vec<RightType>,
}

impl RightTypeSet {
    /// Create a right-type set, keeping the first occurrence of each name.
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RightType>,
    {
        let mut out: Vec<RightType> = Vec::new();
        for rt in types {
            let rt = rt.into();
            if !out.contains(&rt) {
                out.push(rt);
            }
        }
        Self { types: out }
    }

    /// Check whether a right type belongs to the set.
    pub fn contains(&self, right_type: &RightType) -> bool {
        self.types.contains(right_type)
    }

    /// Iterate the right types in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &RightType> {
        self.types.iter()
    }

    /// Number of right types in the set.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> IntoIterator for &'a RightTypeSet {
    type Item = &'a RightType;
    type IntoIter = std::slice::Iter<'a, RightType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
