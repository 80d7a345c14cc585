//! Storage traits
//!
//! This module defines the two traits a storage backend implements: the
//! autocommit store handle and the write transaction a resource-creation
//! event runs in.

use async_trait::async_trait;
use std::collections::BTreeMap;

use acl_core::{AccessMask, Resource, RightType, RightTypeSet, UserId};

use crate::error::StoreResult;

/// Store handle for autocommit reads and single-row writes.
///
/// Reads are isolated from open transactions: `resources` and
/// `full_access_mask` never observe a resource set that is mid-creation.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// All resources, ordered by id ascending.
    async fn resources(&self) -> StoreResult<Vec<Resource>>;

    /// Sum of all current resource weights (the "access to everything"
    /// mask).
    async fn full_access_mask(&self) -> StoreResult<AccessMask>;

    /// The stored mask of one grantee for one right type.
    ///
    /// # Returns
    ///
    /// `None` when the grantee has no row at all. This is distinct from
    /// a stored zero mask and resolves to "no access" in queries.
    async fn read_mask(&self, user: UserId, right_type: &RightType)
        -> StoreResult<Option<AccessMask>>;

    /// Upsert exactly the given right types' masks for one grantee in one
    /// atomic statement.
    ///
    /// Right types not present in `masks` are left untouched. A grantee
    /// with no row yet gets one holding exactly the given masks.
    async fn write_masks(
        &self,
        user: UserId,
        masks: &BTreeMap<RightType, AccessMask>,
    ) -> StoreResult<()>;

    /// Insert a fresh grantee row with the given initial masks.
    ///
    /// # Returns
    ///
    /// The store-allocated user id.
    async fn insert_grantee(
        &self,
        name: &str,
        initial: &BTreeMap<RightType, AccessMask>,
    ) -> StoreResult<UserId>;

    /// Open a write transaction.
    ///
    /// All mutations of a resource-creation event run inside one
    /// transaction; dropping it without [`GrantTransaction::commit`] rolls
    /// everything back.
    async fn begin(&self) -> StoreResult<Box<dyn GrantTransaction>>;
}

/// One open write transaction.
///
/// The transaction sees its own uncommitted writes (`full_access_mask`
/// straddles the resource insert to obtain the before/after sums) while
/// concurrent readers keep seeing the pre-transaction state until commit.
#[async_trait]
pub trait GrantTransaction: Send {
    /// Sum of all resource weights as visible inside this transaction.
    async fn full_access_mask(&self) -> StoreResult<AccessMask>;

    /// Insert a new resource, allocating the next id and the next weight
    /// `2^(count + 1)` from the transaction-local resource count.
    ///
    /// # Errors
    ///
    /// [`crate::StoreError::WeightOverflow`] once no further weight fits
    /// into the mask space.
    async fn insert_resource(&mut self, name: &str) -> StoreResult<Resource>;

    /// For every grantee whose mask equals `matches` on **every** right
    /// type of the set, set every right type's mask to `new`.
    ///
    /// One scan over all grantees, no per-grantee round trips.
    ///
    /// # Returns
    ///
    /// The number of grantee rows updated.
    async fn set_where_all_masks_equal(
        &mut self,
        right_types: &RightTypeSet,
        matches: AccessMask,
        new: AccessMask,
    ) -> StoreResult<u64>;

    /// For every grantee whose mask for `right_type` equals exactly
    /// `matches`, set that right type's mask to `new`.
    ///
    /// # Returns
    ///
    /// The number of grantee rows updated.
    async fn set_where_mask_equals(
        &mut self,
        right_type: &RightType,
        matches: AccessMask,
        new: AccessMask,
    ) -> StoreResult<u64>;

    /// Commit all staged writes atomically.
    async fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Discard all staged writes. Dropping the transaction has the same
    /// effect.
    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}
