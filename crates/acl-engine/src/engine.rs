//! Grant engine
//!
//! The engine composes the storage collaborator with the pure mask
//! algorithms: resolving a mask back into resources, normalizing sparse
//! grant forms, applying them, and creating users and resources.

use std::collections::BTreeMap;
use std::sync::Arc;

use acl_core::{
    AccessMask, GrantRequest, Resource, ResourceId, RightType, RightTypeSet, UserId, Weight,
};
use acl_store::GrantStore;

use crate::error::{AclError, AclResult};
use crate::registry::ResourceRegistry;

/// The grant query/update engine.
///
/// Constructed over a shared store handle and a closed right-type set; the
/// set is the engine's whole configuration and every right-type argument is
/// validated against it.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use acl_core::{GrantRequest, ResourceId, RightType, RightTypeSet};
/// use acl_engine::{AclResult, GrantEngine};
/// use acl_store::MemoryStore;
///
/// # async fn demo() -> AclResult<()> {
/// let engine = GrantEngine::new(
///     Arc::new(MemoryStore::new()),
///     RightTypeSet::new(["addressbook", "search"]),
/// );
///
/// let praha = engine.create_resource("Praha").await?;
/// let adam = engine.create_user("Adam").await?;
///
/// // New users start with full access.
/// let rights = engine.get(adam, &RightType::new("search")).await?;
/// assert_eq!(rights.get(&praha), Some(&"Praha".to_string()));
///
/// // Restrict via a sparse grant form.
/// let form = GrantRequest::new().with(RightType::new("search"), praha, true);
/// engine.apply(adam, &form).await?;
/// # Ok(())
/// # }
/// ```
pub struct GrantEngine<S> {
    /// Shared storage handle.
    store: Arc<S>,
    /// Registry over the same store.
    registry: ResourceRegistry<S>,
    /// The closed right-type set.
    right_types: RightTypeSet,
}

impl<S: GrantStore> GrantEngine<S> {
    /// Create an engine over a shared store handle and a closed right-type
    /// set.
    pub fn new(store: Arc<S>, right_types: RightTypeSet) -> Self {
        let registry = ResourceRegistry::new(Arc::clone(&store), right_types.clone());
        Self {
            store,
            registry,
            right_types,
        }
    }

    /// The engine's right-type set.
    pub fn right_types(&self) -> &RightTypeSet {
        &self.right_types
    }

    /// The resource registry sharing this engine's store.
    pub fn registry(&self) -> &ResourceRegistry<S> {
        &self.registry
    }

    /// Resolve the resources a grantee holds one right type on, ordered by
    /// resource id ascending.
    ///
    /// A grantee with no stored row resolves to an empty map; absence
    /// means no access and is never an error. A resource is included iff
    /// the mask *contains* its weight (containment test, not mere nonzero
    /// overlap).
    ///
    /// # Errors
    ///
    /// [`AclError::UnknownRightType`] when `right_type` is outside the
    /// engine's closed set.
    pub async fn get(
        &self,
        user: UserId,
        right_type: &RightType,
    ) -> AclResult<BTreeMap<ResourceId, String>> {
        if !self.right_types.contains(right_type) {
            return Err(AclError::UnknownRightType(right_type.as_str().to_owned()));
        }

        let mask = match self.store.read_mask(user, right_type).await? {
            Some(mask) => mask,
            None => return Ok(BTreeMap::new()),
        };

        let mut granted = BTreeMap::new();
        for resource in self.store.resources().await? {
            if mask.contains(resource.weight) {
                granted.insert(resource.id, resource.name);
            }
        }
        Ok(granted)
    }

    /// Complete a sparse grant form against the current resource set.
    ///
    /// Exposed for inspection and testing; [`GrantEngine::apply`] performs
    /// the same normalization before writing. See
    /// [`GrantRequest::normalize`] for the rules, in particular the "blank
    /// column means unrestricted" convention.
    pub async fn normalize(&self, request: &GrantRequest) -> AclResult<GrantRequest> {
        let resources = self.store.resources().await?;
        let ids: Vec<ResourceId> = resources.iter().map(|r| r.id).collect();
        Ok(request.normalize(&self.right_types, &ids))
    }

    /// Normalize a grant form and write the resulting masks for one
    /// grantee in one atomic call.
    ///
    /// Resource ids in the form that do not exist contribute nothing to
    /// the mask. Since normalization covers every right type of the closed
    /// set, every right type's mask is written.
    pub async fn apply(&self, user: UserId, request: &GrantRequest) -> AclResult<()> {
        let resources = self.store.resources().await?;
        let ids: Vec<ResourceId> = resources.iter().map(|r| r.id).collect();
        let normalized = request.normalize(&self.right_types, &ids);

        let weights: BTreeMap<ResourceId, Weight> =
            resources.iter().map(|r| (r.id, r.weight)).collect();

        let mut masks = BTreeMap::new();
        for right_type in &self.right_types {
            let mask = normalized
                .allowed_resources(right_type)
                .filter_map(|id| weights.get(&id).copied())
                .fold(AccessMask::EMPTY, |mask, weight| mask.with(weight));
            masks.insert(right_type.clone(), mask);
        }

        self.store.write_masks(user, &masks).await?;
        tracing::debug!(user_id = %user, "Applied grant form");
        Ok(())
    }

    /// Create a grantee holding the current full-access mask on every
    /// right type.
    ///
    /// New users start unrestricted by design and must be explicitly
    /// restricted afterwards via [`GrantEngine::apply`].
    pub async fn create_user(&self, name: &str) -> AclResult<UserId> {
        let full = self.store.full_access_mask().await?;
        let masks: BTreeMap<RightType, AccessMask> = self
            .right_types
            .iter()
            .map(|rt| (rt.clone(), full))
            .collect();
        Ok(self.store.insert_grantee(name, &masks).await?)
    }

    /// Create a resource and propagate grants; see
    /// [`ResourceRegistry::create`].
    pub async fn create_resource(&self, name: &str) -> AclResult<ResourceId> {
        self.registry.create(name).await
    }

    /// All resources ordered by name; see [`ResourceRegistry::list`].
    pub async fn list_resources(&self) -> AclResult<Vec<Resource>> {
        self.registry.list().await
    }
}
