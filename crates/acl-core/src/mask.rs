//! # Masks and weights
//!
//! Core bitmask types for the access model. Every resource owns exactly one
//! power-of-two weight; a grantee's rights for one right type are the sum of
//! a subset of those weights. All bit arithmetic lives here so the storage
//! layer only ever moves plain integers around.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A resource weight: one unique power-of-two bit.
///
/// Weights are assigned in creation order as `2^(count + 1)` where `count`
/// is the number of resources existing at creation time, so the weight set
/// is always `{2, 4, 8, ...}` with no gaps and no reuse.
///
/// # Example
///
/// ```
/// use acl_core::mask::Weight;
///
/// assert_eq!(Weight::for_count(0).unwrap().value(), 2);
/// assert_eq!(Weight::for_count(1).unwrap().value(), 4);
/// assert_eq!(Weight::for_count(2).unwrap().value(), 8);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Weight(u64);

impl Weight {
    /// Compute the weight for the next resource given the current resource
    /// count.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of resources existing before the insert
    ///
    /// # Returns
    ///
    /// `Some(Weight)` with value `2^(count + 1)`, or `None` once the bit
    /// position would leave the 64-bit mask space (count >= 63).
    pub fn for_count(count: usize) -> Option<Self> {
        if count >= 63 {
            return None;
        }
        Some(Self(1u64 << (count + 1)))
    }

    /// Reconstruct a weight from its stored integer value.
    ///
    /// # Returns
    ///
    /// `Some(Weight)` if `value` is a power of two greater than one,
    /// `None` otherwise.
    pub fn from_value(value: u64) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The integer value of this weight.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An access bitmask: the sum of a subset of resource weights.
///
/// Bit `i` set means "has this right on the resource whose weight is `2^i`".
/// The mask for "access to everything" is the sum of all current weights;
/// a mask can never exceed it because weights are never skipped.
///
/// # Example
///
/// ```
/// use acl_core::mask::{AccessMask, Weight};
///
/// let praha = Weight::for_count(0).unwrap(); // 2
/// let brno = Weight::for_count(1).unwrap(); // 4
///
/// let mask = AccessMask::EMPTY.with(praha);
/// assert!(mask.contains(praha));
/// assert!(!mask.contains(brno));
///
/// let full = AccessMask::full_of([praha, brno]);
/// assert_eq!(full.value(), 6);
/// ```
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct AccessMask(u64);

impl AccessMask {
    /// The empty mask (no rights).
    pub const EMPTY: AccessMask = AccessMask(0);

    /// Create a mask from a raw stored integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw integer value of this mask.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Containment test: does this mask grant the given weight?
    ///
    /// This is `mask & weight == weight`, not a mere nonzero-overlap test.
    /// With one unique bit per resource the two coincide; containment is
    /// what a multi-bit-per-resource scheme would still need.
    pub fn contains(self, weight: Weight) -> bool {
        self.0 & weight.value() == weight.value()
    }

    /// Return this mask with the given weight added.
    pub fn with(self, weight: Weight) -> Self {
        Self(self.0 | weight.value())
    }

    /// Compute the full-access mask from all current weights.
    ///
    /// # Arguments
    ///
    /// * `weights` - An iterator over every existing resource weight
    pub fn full_of<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = Weight>,
    {
        weights
            .into_iter()
            .fold(Self::EMPTY, |mask, w| mask.with(w))
    }

    /// Check if this mask grants nothing.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AccessMask {
    type Output = AccessMask;

    fn bitor(self, rhs: AccessMask) -> AccessMask {
        AccessMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessMask {
    fn bitor_assign(&mut self, rhs: AccessMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
