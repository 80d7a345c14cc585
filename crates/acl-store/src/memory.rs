//! In-memory storage backend
//!
//! This backend is suitable for single-process applications and testing.
//! A transaction takes the table write lock for its whole lifetime and
//! mutates a staged copy of the tables; commit swaps the staged copy in,
//! drop discards it. Readers keep the pre-transaction state until commit,
//! so `full_access_mask` never observes a mid-creation resource set.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use acl_core::{AccessMask, Grantee, Resource, ResourceId, RightType, RightTypeSet, UserId, Weight};

use crate::error::{StoreError, StoreResult};
use crate::store::{GrantStore, GrantTransaction};

/// The stored tables: resource rows and grantee rows.
#[derive(Debug, Clone, Default)]
struct Tables {
    /// Resource rows in creation (id) order.
    resources: Vec<Resource>,
    /// Grantee rows keyed by user id.
    grantees: BTreeMap<UserId, Grantee>,
    /// Last allocated resource id.
    last_resource_id: i64,
    /// Last allocated user id.
    last_user_id: i64,
}

impl Tables {
    fn next_resource_id(&mut self) -> ResourceId {
        self.last_resource_id += 1;
        ResourceId::new(self.last_resource_id)
    }

    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    fn full_access_mask(&self) -> AccessMask {
        AccessMask::full_of(self.resources.iter().map(|r| r.weight))
    }
}

/// In-memory grant store.
///
/// # Example
///
/// ```rust,no_run
/// use acl_store::memory::MemoryStore;
/// use acl_store::{GrantStore, StoreResult};
///
/// # async fn demo() -> StoreResult<()> {
/// let store = MemoryStore::new();
/// let mut tx = store.begin().await?;
/// tx.insert_resource("Praha").await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// The tables, shared between store handles and open transactions.
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrantStore for MemoryStore {
    async fn resources(&self) -> StoreResult<Vec<Resource>> {
        Ok(self.tables.read().await.resources.clone())
    }

    async fn full_access_mask(&self) -> StoreResult<AccessMask> {
        Ok(self.tables.read().await.full_access_mask())
    }

    async fn read_mask(
        &self,
        user: UserId,
        right_type: &RightType,
    ) -> StoreResult<Option<AccessMask>> {
        let tables = self.tables.read().await;
        Ok(tables
            .grantees
            .get(&user)
            .and_then(|grantee| grantee.mask(right_type)))
    }

    async fn write_masks(
        &self,
        user: UserId,
        masks: &BTreeMap<RightType, AccessMask>,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let grantee = tables
            .grantees
            .entry(user)
            .or_insert_with(|| Grantee::new(user, ""));
        for (right_type, mask) in masks {
            grantee.set_mask(right_type.clone(), *mask);
        }
        Ok(())
    }

    async fn insert_grantee(
        &self,
        name: &str,
        initial: &BTreeMap<RightType, AccessMask>,
    ) -> StoreResult<UserId> {
        let mut tables = self.tables.write().await;
        let id = tables.next_user_id();
        let mut grantee = Grantee::new(id, name);
        for (right_type, mask) in initial {
            grantee.set_mask(right_type.clone(), *mask);
        }
        tables.grantees.insert(id, grantee);
        tracing::debug!(user_id = %id, name = %name, "Inserted grantee");
        Ok(id)
    }

    async fn begin(&self) -> StoreResult<Box<dyn GrantTransaction>> {
        let guard = Arc::clone(&self.tables).write_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }
}

/// One open write transaction over a [`MemoryStore`].
///
/// Holds the table write lock until commit or drop; all writes go to the
/// staged copy.
struct MemoryTransaction {
    /// Write lock over the live tables, held for the transaction lifetime.
    guard: OwnedRwLockWriteGuard<Tables>,
    /// The transaction-local view all writes go to.
    staged: Tables,
}

#[async_trait]
impl GrantTransaction for MemoryTransaction {
    async fn full_access_mask(&self) -> StoreResult<AccessMask> {
        Ok(self.staged.full_access_mask())
    }

    async fn insert_resource(&mut self, name: &str) -> StoreResult<Resource> {
        let count = self.staged.resources.len();
        let weight = Weight::for_count(count).ok_or(StoreError::WeightOverflow)?;
        let id = self.staged.next_resource_id();
        let resource = Resource::new(id, name, weight);
        self.staged.resources.push(resource.clone());
        tracing::debug!(resource_id = %id, name = %name, weight = %weight, "Inserted resource");
        Ok(resource)
    }

    async fn set_where_all_masks_equal(
        &mut self,
        right_types: &RightTypeSet,
        matches: AccessMask,
        new: AccessMask,
    ) -> StoreResult<u64> {
        let mut rows = 0;
        for grantee in self.staged.grantees.values_mut() {
            if grantee.has_uniform_mask(right_types, matches) {
                for right_type in right_types {
                    grantee.set_mask(right_type.clone(), new);
                }
                rows += 1;
            }
        }
        Ok(rows)
    }

    async fn set_where_mask_equals(
        &mut self,
        right_type: &RightType,
        matches: AccessMask,
        new: AccessMask,
    ) -> StoreResult<u64> {
        let mut rows = 0;
        for grantee in self.staged.grantees.values_mut() {
            if grantee.mask(right_type) == Some(matches) {
                grantee.set_mask(right_type.clone(), new);
                rows += 1;
            }
        }
        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTransaction { mut guard, staged } = *self;
        tracing::debug!(
            resources = staged.resources.len(),
            grantees = staged.grantees.len(),
            "Committing transaction"
        );
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        // Dropping the staged copy and the lock is the whole rollback.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_resources(store: &MemoryStore, names: &[&str]) -> Vec<Resource> {
        let mut tx = store.begin().await.unwrap();
        let mut out = Vec::new();
        for name in names {
            out.push(tx.insert_resource(name).await.unwrap());
        }
        tx.commit().await.unwrap();
        out
    }

    #[tokio::test]
    async fn test_resource_insert_allocates_ids_and_weights() {
        let store = MemoryStore::new();
        let resources = seed_resources(&store, &["Praha", "Brno", "Ostrava"]).await;

        let ids: Vec<i64> = resources.iter().map(|r| r.id.value()).collect();
        let weights: Vec<u64> = resources.iter().map(|r| r.weight.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(weights, vec![2, 4, 8]);

        assert_eq!(store.full_access_mask().await.unwrap(), AccessMask::new(14));
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = MemoryStore::new();
        seed_resources(&store, &["Praha"]).await;

        let mut tx = store.begin().await.unwrap();
        tx.insert_resource("Brno").await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.resources().await.unwrap().len(), 1);
        assert_eq!(store.full_access_mask().await.unwrap(), AccessMask::new(2));
    }

    #[tokio::test]
    async fn test_transaction_sees_own_insert() {
        let store = MemoryStore::new();
        seed_resources(&store, &["Praha"]).await;

        let mut tx = store.begin().await.unwrap();
        let before = tx.full_access_mask().await.unwrap();
        let brno = tx.insert_resource("Brno").await.unwrap();
        let after = tx.full_access_mask().await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(before, AccessMask::new(2));
        assert_eq!(after, AccessMask::new(2 + brno.weight.value()));
    }

    #[tokio::test]
    async fn test_read_mask_absent_row_is_none() {
        let store = MemoryStore::new();
        let rt = RightType::new("search");
        assert_eq!(
            store.read_mask(UserId::new(99), &rt).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_write_masks_touches_only_listed_right_types() {
        let store = MemoryStore::new();
        let addressbook = RightType::new("addressbook");
        let search = RightType::new("search");

        let initial: BTreeMap<RightType, AccessMask> = [
            (addressbook.clone(), AccessMask::new(6)),
            (search.clone(), AccessMask::new(6)),
        ]
        .into_iter()
        .collect();
        let user = store.insert_grantee("Adam", &initial).await.unwrap();

        let update: BTreeMap<RightType, AccessMask> =
            [(search.clone(), AccessMask::new(2))].into_iter().collect();
        store.write_masks(user, &update).await.unwrap();

        assert_eq!(
            store.read_mask(user, &addressbook).await.unwrap(),
            Some(AccessMask::new(6))
        );
        assert_eq!(
            store.read_mask(user, &search).await.unwrap(),
            Some(AccessMask::new(2))
        );
    }

    #[tokio::test]
    async fn test_conditional_updates_match_exactly() {
        let store = MemoryStore::new();
        let rights = RightTypeSet::new(["addressbook", "search"]);
        let addressbook = RightType::new("addressbook");
        let search = RightType::new("search");

        let masks = |a: u64, s: u64| -> BTreeMap<RightType, AccessMask> {
            [
                (addressbook.clone(), AccessMask::new(a)),
                (search.clone(), AccessMask::new(s)),
            ]
            .into_iter()
            .collect()
        };

        // Bob sums to 6 without being full anywhere; Cyril is full on one
        // right type; Fred is full on both.
        let bob = store.insert_grantee("Bob", &masks(4, 2)).await.unwrap();
        let cyril = store.insert_grantee("Cyril", &masks(6, 4)).await.unwrap();
        let fred = store.insert_grantee("Fred", &masks(6, 6)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let uniform = tx
            .set_where_all_masks_equal(&rights, AccessMask::new(6), AccessMask::new(14))
            .await
            .unwrap();
        let single = tx
            .set_where_mask_equals(&addressbook, AccessMask::new(6), AccessMask::new(14))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(uniform, 1);
        assert_eq!(single, 1);

        assert_eq!(
            store.read_mask(bob, &addressbook).await.unwrap(),
            Some(AccessMask::new(4))
        );
        assert_eq!(
            store.read_mask(cyril, &addressbook).await.unwrap(),
            Some(AccessMask::new(14))
        );
        assert_eq!(
            store.read_mask(cyril, &search).await.unwrap(),
            Some(AccessMask::new(4))
        );
        assert_eq!(
            store.read_mask(fred, &search).await.unwrap(),
            Some(AccessMask::new(14))
        );
    }
}
