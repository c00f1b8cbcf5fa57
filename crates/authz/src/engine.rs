//! Access decision engine.
//!
//! Constructed once from a normalized binding and never mutated. Every
//! query is pure, synchronous computation over in-memory state; absence
//! (unknown module, missing grant) is a negative boolean, never an error.

use std::collections::HashSet;

use crate::module_access::{ModuleAccess, ModuleId};
use crate::permissions::{Grant, Permission};

/// Immutable authorization snapshot for one session/company binding.
///
/// # Invariants
/// - `module_id` is unique across `modules` (enforced by the binding
///   builder); lookups take the first match.
/// - The coarse grant set and the per-module `(action, resource)` lists are
///   independent namespaces and are queried through separate operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionEngine {
    grants: HashSet<Grant>,
    modules: Vec<ModuleAccess>,
}

impl DecisionEngine {
    pub fn new(grants: HashSet<Grant>, modules: Vec<ModuleAccess>) -> Self {
        Self { grants, modules }
    }

    /// Engine that denies everything (the cleared-binding state).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn grants(&self) -> &HashSet<Grant> {
        &self.grants
    }

    pub fn modules(&self) -> &[ModuleAccess] {
        &self.modules
    }

    /// Exact membership test in the coarse grant set.
    pub fn has_permission(&self, grant: &Grant) -> bool {
        self.grants.contains(grant)
    }

    /// True iff at least one of `grants` is held.
    ///
    /// An empty slice is a vacuous **deny**: callers that mean "no
    /// restriction" must special-case the empty list themselves.
    pub fn has_any_permission(&self, grants: &[Grant]) -> bool {
        grants.iter().any(|g| self.grants.contains(g))
    }

    /// True iff every element of `grants` is held.
    ///
    /// An empty slice is vacuously **true**. The asymmetry with
    /// `has_any_permission` is intentional and load-bearing for call sites
    /// that pass `[]` to mean "no extra requirement".
    pub fn has_all_permissions(&self, grants: &[Grant]) -> bool {
        grants.iter().all(|g| self.grants.contains(g))
    }

    fn module(&self, module_id: &ModuleId) -> Option<&ModuleAccess> {
        self.modules.iter().find(|m| &m.module_id == module_id)
    }

    /// Whether the module is subscribed and active. Unlisted modules are
    /// denied.
    pub fn can_access_module(&self, module_id: &ModuleId) -> bool {
        self.module(module_id).is_some_and(|m| m.is_active)
    }

    /// The module's permission list; empty when the module is absent.
    pub fn module_permissions(&self, module_id: &ModuleId) -> &[Permission] {
        self.module(module_id)
            .map(|m| m.permissions.as_slice())
            .unwrap_or(&[])
    }

    /// Fine-grained check: the module must be accessible, and its list must
    /// contain an exactly matching `(action, resource)` pair. The module
    /// gate dominates: an inactive module denies even a matching pair.
    pub fn can_perform_action(&self, module_id: &ModuleId, action: &str, resource: &str) -> bool {
        if !self.can_access_module(module_id) {
            return false;
        }
        self.module_permissions(module_id)
            .iter()
            .any(|p| p.matches(action, resource))
    }
}
