//! Bypass marker resolution.

use std::sync::Arc;

use crate::http::authz::hierarchy::TypeHierarchy;
use crate::http::authz::resource::{MethodRef, ResourceType};

/// Decides whether a resource method skips authorization entirely.
///
/// A method bypasses when its declaration carries the marker, or when the
/// resource type or any of its supertypes does.
#[derive(Clone, Debug, Default)]
pub struct BypassResolver {
    hierarchy: Arc<TypeHierarchy>,
}

impl BypassResolver {
    pub fn new(hierarchy: Arc<TypeHierarchy>) -> Self {
        BypassResolver { hierarchy }
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Checks the method declaration first, then the type chain.
    ///
    /// The declaration is the nearest one found walking up from
    /// `resource_type`, so an inherited method keeps the marker of the type
    /// that declared it.
    pub fn should_bypass(&self, resource_type: &ResourceType, method: &MethodRef) -> bool {
        let method_marked = self
            .hierarchy
            .ancestors(resource_type)
            .find_map(|ty| ty.declared_method(method))
            .unwrap_or(false);

        method_marked
            || self
                .hierarchy
                .ancestors(resource_type)
                .any(|ty| ty.has_bypass_marker())
    }
}
