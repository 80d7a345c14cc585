//! # Grant requests
//!
//! The transient form a caller submits when setting grants: per right type,
//! per resource, a checkbox. The form is sparse and possibly partial; the
//! normalization algorithm completes it before any mask is computed. The
//! raw form is never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resource::ResourceId;
use crate::rights::{RightType, RightTypeSet};

/// A sparse grant form: `right type → resource id → checked`.
///
/// The structure has a fixed depth of two; an absent resource entry and a
/// `false` entry mean the same thing. Deserializes directly from the nested
/// JSON object an outer HTTP or CLI collaborator receives.
///
/// # The "blank column" convention
///
/// **A right type with no `true` entry (including one omitted from the
/// form entirely) normalizes to full access for that right type, not to a
/// denial.** A completely blank form normalizes to full access everywhere.
/// Callers that want to restrict a right type must submit at least one
/// `true` entry for it. This convention is deliberate and easy to misread;
/// see [`GrantRequest::normalize`].
///
/// # Example
///
/// ```
/// use acl_core::{GrantRequest, ResourceId, RightType};
///
/// let req = GrantRequest::new()
///     .with(RightType::new("addressbook"), ResourceId::new(1), true)
///     .with(RightType::new("addressbook"), ResourceId::new(2), false);
///
/// assert!(req.is_allowed(&RightType::new("addressbook"), ResourceId::new(1)));
/// assert!(!req.is_allowed(&RightType::new("addressbook"), ResourceId::new(2)));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GrantRequest {
    /// The checkbox columns, one per right type.
    columns: BTreeMap<RightType, BTreeMap<ResourceId, bool>>,
}

impl GrantRequest {
    /// Create an empty (fully blank) form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style entry setter.
    pub fn with(mut self, right_type: RightType, resource: ResourceId, allowed: bool) -> Self {
        self.set(right_type, resource, allowed);
        self
    }

    /// Builder-style empty column (the right type present but nothing
    /// checked).
    pub fn with_blank_column(mut self, right_type: RightType) -> Self {
        self.columns.entry(right_type).or_default();
        self
    }

    /// Set one checkbox.
    pub fn set(&mut self, right_type: RightType, resource: ResourceId, allowed: bool) {
        self.columns
            .entry(right_type)
            .or_default()
            .insert(resource, allowed);
    }

    /// Check one entry; an absent entry reads as `false`.
    pub fn is_allowed(&self, right_type: &RightType, resource: ResourceId) -> bool {
        self.columns
            .get(right_type)
            .and_then(|col| col.get(&resource))
            .copied()
            .unwrap_or(false)
    }

    /// The right types present in the form.
    pub fn right_types(&self) -> impl Iterator<Item = &RightType> {
        self.columns.keys()
    }

    /// One column of the form, if present.
    pub fn column(&self, right_type: &RightType) -> Option<&BTreeMap<ResourceId, bool>> {
        self.columns.get(right_type)
    }

    /// The resource ids checked `true` for one right type, ascending.
    pub fn allowed_resources<'a>(
        &'a self,
        right_type: &RightType,
    ) -> impl Iterator<Item = ResourceId> + 'a {
        self.columns
            .get(right_type)
            .into_iter()
            .flatten()
            .filter(|(_, allowed)| **allowed)
            .map(|(id, _)| *id)
    }

    /// Complete a sparse form against the closed right-type set and the
    /// current resource ids.
    ///
    /// Rules, applied in order:
    /// 1. Every `false` leaf is stripped (identical to being absent), and
    ///    right types outside the closed set are dropped.
    /// 2. A form left empty across **all** right types becomes full access:
    ///    every right type maps every existing resource to `true`.
    /// 3. Otherwise, independently per right type of the closed set: an
    ///    empty or absent column becomes every resource `true`; a non-empty
    ///    column stands exactly as given.
    ///
    /// The result always covers every right type of the set and contains
    /// only `true` leaves. The function is pure and idempotent.
    ///
    /// # Arguments
    ///
    /// * `right_types` - The closed right-type set
    /// * `resources` - Ids of every existing resource
    pub fn normalize(&self, right_types: &RightTypeSet, resources: &[ResourceId]) -> GrantRequest {
        let stripped = self.stripped(right_types);

        let full_column: BTreeMap<ResourceId, bool> =
            resources.iter().map(|id| (*id, true)).collect();

        let blank_form = stripped.values().all(|col| col.is_empty());

        let columns = right_types
            .iter()
            .map(|rt| {
                let column = match stripped.get(rt) {
                    Some(col) if !blank_form && !col.is_empty() => col.clone(),
                    _ => full_column.clone(),
                };
                (rt.clone(), column)
            })
            .collect();

        GrantRequest { columns }
    }

    /// Drop `false` leaves and unknown right types. Depth is fixed at two,
    /// so no recursion is needed.
    fn stripped(&self, right_types: &RightTypeSet) -> BTreeMap<RightType, BTreeMap<ResourceId, bool>> {
        self.columns
            .iter()
            .filter(|(rt, _)| right_types.contains(rt))
            .map(|(rt, col)| {
                let kept: BTreeMap<ResourceId, bool> = col
                    .iter()
                    .filter(|(_, allowed)| **allowed)
                    .map(|(id, allowed)| (*id, *allowed))
                    .collect();
                (rt.clone(), kept)
            })
            .collect()
    }
}
