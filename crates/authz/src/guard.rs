//! Declarative boundary guards for routes and components.
//!
//! Guards convert decision-engine queries into allow/deny effects. The
//! engine is passed explicitly on every evaluation (no ambient context);
//! when the binding is not ready the engine is absent and every supplied
//! condition denies. Guards never panic and never return errors.

use crate::engine::DecisionEngine;
use crate::module_access::ModuleId;
use crate::permissions::Grant;

/// Boundary check gating on module activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGate {
    module_id: ModuleId,
}

impl ModuleGate {
    pub fn new(module_id: ModuleId) -> Self {
        Self { module_id }
    }

    /// Passes iff an engine is bound and the module is accessible. An
    /// absent engine denies rather than passing through.
    pub fn passes(&self, engine: Option<&DecisionEngine>) -> bool {
        engine.is_some_and(|e| e.can_access_module(&self.module_id))
    }
}

/// Fine-grained `(module, action, resource)` requirement for a permission
/// gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequirement {
    pub module_id: ModuleId,
    pub action: String,
    pub resource: String,
}

impl ActionRequirement {
    pub fn new(
        module_id: ModuleId,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            module_id,
            action: action.into(),
            resource: resource.into(),
        }
    }
}

/// Boundary check gating on permissions.
///
/// Both conditions are optional; a condition that is not supplied is
/// trivially satisfied (it is simply not evaluated). When both are
/// supplied, they combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGate {
    action: Option<ActionRequirement>,
    any_of: Vec<Grant>,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a fine-grained action check to pass.
    pub fn require_action(mut self, requirement: ActionRequirement) -> Self {
        self.action = Some(requirement);
        self
    }

    /// Require at least one of `grants` to be held. An empty list imposes
    /// no condition (the gate treats it as unsupplied, not as a deny).
    pub fn any_of(mut self, grants: Vec<Grant>) -> Self {
        self.any_of = grants;
        self
    }

    pub fn passes(&self, engine: Option<&DecisionEngine>) -> bool {
        if let Some(requirement) = &self.action {
            let allowed = engine.is_some_and(|e| {
                e.can_perform_action(
                    &requirement.module_id,
                    &requirement.action,
                    &requirement.resource,
                )
            });
            if !allowed {
                return false;
            }
        }

        if !self.any_of.is_empty() {
            let allowed = engine.is_some_and(|e| e.has_any_permission(&self.any_of));
            if !allowed {
                return false;
            }
        }

        true
    }
}

/// One stackable boundary condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Module(ModuleGate),
    Permission(PermissionGate),
}

impl Gate {
    pub fn passes(&self, engine: Option<&DecisionEngine>) -> bool {
        match self {
            Gate::Module(gate) => gate.passes(engine),
            Gate::Permission(gate) => gate.passes(engine),
        }
    }
}

/// Stacked gates combine with logical AND.
pub fn all_pass(gates: &[Gate], engine: Option<&DecisionEngine>) -> bool {
    gates.iter().all(|g| g.passes(engine))
}

/// Route-level outcome. The two denial causes must be handled differently
/// by the routing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// No authenticated principal: redirect to login, preserving the
    /// attempted destination for post-login return.
    Login { return_to: String },
    /// Authenticated but insufficient permission: render a fallback view in
    /// place, no redirect.
    Forbidden,
}

/// Route-level guard over a stack of gates.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    gates: Vec<Gate>,
}

impl RouteGuard {
    pub fn new(gates: Vec<Gate>) -> Self {
        Self { gates }
    }

    pub fn decide(
        &self,
        authenticated: bool,
        engine: Option<&DecisionEngine>,
        attempted: &str,
    ) -> RouteDecision {
        if !authenticated {
            return RouteDecision::Login {
                return_to: attempted.to_string(),
            };
        }
        if all_pass(&self.gates, engine) {
            RouteDecision::Allow
        } else {
            RouteDecision::Forbidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_access::ModuleAccess;
    use crate::permissions::Permission;
    use std::collections::HashSet;

    fn engine() -> DecisionEngine {
        let grants: HashSet<Grant> = [Grant::new("inventory:read")].into_iter().collect();
        DecisionEngine::new(
            grants,
            vec![ModuleAccess::new(
                ModuleId::new("inventory"),
                true,
                vec![Permission::new("read", "inventory")],
            )],
        )
    }

    #[test]
    fn module_gate_denies_without_engine() {
        let gate = ModuleGate::new(ModuleId::new("inventory"));
        assert!(!gate.passes(None));
        assert!(gate.passes(Some(&engine())));
    }

    #[test]
    fn unsupplied_permission_conditions_are_trivially_satisfied() {
        let gate = PermissionGate::new();
        assert!(gate.passes(Some(&engine())));
        // Nothing was asked, so even a missing engine passes.
        assert!(gate.passes(None));
    }

    #[test]
    fn supplied_conditions_combine_with_and() {
        let engine = engine();

        let action_only = PermissionGate::new().require_action(ActionRequirement::new(
            ModuleId::new("inventory"),
            "read",
            "inventory",
        ));
        assert!(action_only.passes(Some(&engine)));
        assert!(!action_only.passes(None));

        let both = action_only.clone().any_of(vec![Grant::new("sales:read")]);
        // Action passes but the coarse list does not: AND denies.
        assert!(!both.passes(Some(&engine)));

        let both_held = action_only.any_of(vec![Grant::new("inventory:read")]);
        assert!(both_held.passes(Some(&engine)));
    }

    #[test]
    fn stacked_gates_all_must_pass() {
        let engine = engine();
        let gates = vec![
            Gate::Module(ModuleGate::new(ModuleId::new("inventory"))),
            Gate::Permission(
                PermissionGate::new().any_of(vec![Grant::new("inventory:read")]),
            ),
        ];
        assert!(all_pass(&gates, Some(&engine)));

        let gates_with_failure = vec![
            Gate::Module(ModuleGate::new(ModuleId::new("inventory"))),
            Gate::Module(ModuleGate::new(ModuleId::new("sales"))),
        ];
        assert!(!all_pass(&gates_with_failure, Some(&engine)));
    }

    #[test]
    fn route_guard_distinguishes_denial_causes() {
        let guard = RouteGuard::new(vec![Gate::Module(ModuleGate::new(ModuleId::new(
            "inventory",
        )))]);

        let unauthenticated = guard.decide(false, None, "/inventory/items");
        assert_eq!(
            unauthenticated,
            RouteDecision::Login {
                return_to: "/inventory/items".to_string()
            }
        );

        // Authenticated but binding not ready: deny in place, no redirect.
        assert_eq!(guard.decide(true, None, "/inventory/items"), RouteDecision::Forbidden);

        let engine = engine();
        assert_eq!(
            guard.decide(true, Some(&engine), "/inventory/items"),
            RouteDecision::Allow
        );
    }
}
