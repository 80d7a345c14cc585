//! Resource registry
//!
//! The registry owns the growable resource set: listing, the full-access
//! sum, and resource creation. Creation and its grant propagation run as
//! one atomically committed transaction: if any propagation step fails,
//! the resource insert rolls back with it, so a full-access grantee can
//! never be left without the new resource.

use std::sync::Arc;

use acl_core::{AccessMask, Resource, ResourceId, RightTypeSet};
use acl_store::GrantStore;

use crate::error::AclResult;

/// Registry over the growable resource set.
pub struct ResourceRegistry<S> {
    /// Shared storage handle.
    store: Arc<S>,
    /// The closed right-type set propagation updates range over.
    right_types: RightTypeSet,
}

impl<S: GrantStore> ResourceRegistry<S> {
    /// Create a registry over a shared store handle.
    pub fn new(store: Arc<S>, right_types: RightTypeSet) -> Self {
        Self { store, right_types }
    }

    /// All resources ordered by name (ties broken by id).
    pub async fn list(&self) -> AclResult<Vec<Resource>> {
        let mut resources = self.store.resources().await?;
        resources.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(resources)
    }

    /// Sum of all current resource weights.
    pub async fn full_access_mask(&self) -> AclResult<AccessMask> {
        Ok(self.store.full_access_mask().await?)
    }

    /// Create a resource and propagate grants to existing grantees, all in
    /// one transaction.
    ///
    /// The new resource gets the next weight `2^(count + 1)`. Propagation
    /// runs in two ordered passes over the before/after full-access sums:
    ///
    /// 1. **Cross-right-type pass**: every grantee holding exactly the old
    ///    full-access mask on *every* right type gets every right type set
    ///    to the new full-access mask; "had everything everywhere" keeps
    ///    meaning everything.
    /// 2. **Per-right-type pass**: independently for each right type, every
    ///    grantee holding exactly the old full-access mask on that right
    ///    type alone gets it set to the new full-access mask.
    ///
    /// Rows pass 1 updated no longer match the old sum, so pass 2 never
    /// double-processes them; the pass order must stay 1 then 2. Grantees
    /// with any partial mask gain nothing for that right type.
    ///
    /// # Returns
    ///
    /// The id of the created resource.
    ///
    /// # Errors
    ///
    /// Any storage failure rolls the whole creation back; no resource is
    /// left half-created and no mask half-updated.
    pub async fn create(&self, name: &str) -> AclResult<ResourceId> {
        let mut tx = self.store.begin().await?;

        let old_full = tx.full_access_mask().await?;
        let resource = tx.insert_resource(name).await?;
        let new_full = tx.full_access_mask().await?;

        let uniform_rows = tx
            .set_where_all_masks_equal(&self.right_types, old_full, new_full)
            .await?;

        let mut single_rows = 0;
        for right_type in &self.right_types {
            single_rows += tx
                .set_where_mask_equals(right_type, old_full, new_full)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            resource_id = %resource.id,
            name = %name,
            old_full = %old_full,
            new_full = %new_full,
            uniform_rows,
            single_rows,
            "Created resource and propagated grants"
        );

        Ok(resource.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_store::MemoryStore;

    fn registry() -> ResourceRegistry<MemoryStore> {
        ResourceRegistry::new(
            Arc::new(MemoryStore::new()),
            RightTypeSet::new(["addressbook", "search"]),
        )
    }

    #[tokio::test]
    async fn test_weights_grow_strictly_in_creation_order() {
        let registry = registry();
        for name in ["Praha", "Brno", "Ostrava", "Plzen"] {
            registry.create(name).await.unwrap();
        }

        let mut resources = registry.list().await.unwrap();
        resources.sort_by_key(|r| r.id);

        let weights: Vec<u64> = resources.iter().map(|r| r.weight.value()).collect();
        assert_eq!(weights, vec![2, 4, 8, 16]);

        let mut seen = AccessMask::EMPTY;
        for r in &resources {
            assert!(!seen.contains(r.weight));
            seen = seen.with(r.weight);
        }
        assert_eq!(registry.full_access_mask().await.unwrap(), seen);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let registry = registry();
        for name in ["Praha", "Brno", "Ostrava"] {
            registry.create(name).await.unwrap();
        }

        let listed = registry.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Brno", "Ostrava", "Praha"]);
    }
}
