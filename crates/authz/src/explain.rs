//! Decision explanation for audit/debug surfaces.
//!
//! Answers "why was this action allowed or denied?" without changing the
//! decision itself: for every input, `explain_action` agrees with
//! `can_perform_action`.

use serde::Serialize;

use crate::engine::DecisionEngine;
use crate::module_access::ModuleId;

/// Detailed record of one fine-grained access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub module_id: ModuleId,
    pub action: String,
    pub resource: String,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Present iff the decision was a denial.
    pub denial: Option<DenialKind>,
}

/// Why a fine-grained check was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The module is not part of the current binding at all.
    ModuleUnknown,
    /// The module is subscribed but deactivated.
    ModuleInactive,
    /// The module is usable but holds no matching `(action, resource)` pair.
    MissingPermission,
}

impl DecisionEngine {
    /// Explain a `can_perform_action` decision.
    pub fn explain_action(
        &self,
        module_id: &ModuleId,
        action: &str,
        resource: &str,
    ) -> AccessExplanation {
        let base = |granted: bool, reason: String, denial: Option<DenialKind>| AccessExplanation {
            module_id: module_id.clone(),
            action: action.to_string(),
            resource: resource.to_string(),
            granted,
            reason,
            denial,
        };

        let Some(module) = self.modules().iter().find(|m| &m.module_id == module_id) else {
            return base(
                false,
                format!("module '{module_id}' is not part of the current binding"),
                Some(DenialKind::ModuleUnknown),
            );
        };

        if !module.is_active {
            return base(
                false,
                format!("module '{module_id}' is subscribed but not active"),
                Some(DenialKind::ModuleInactive),
            );
        }

        if module.permissions.iter().any(|p| p.matches(action, resource)) {
            base(
                true,
                format!("module '{module_id}' grants '{action}' on '{resource}'"),
                None,
            )
        } else {
            base(
                false,
                format!("module '{module_id}' holds no grant for '{action}' on '{resource}'"),
                Some(DenialKind::MissingPermission),
            )
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
        DecisionEngine::new(
            HashSet::new(),
            vec![
                ModuleAccess::new(
                    ModuleId::new("inventory"),
                    true,
                    vec![Permission::new("read", "inventory")],
                ),
                ModuleAccess::new(ModuleId::new("payroll"), false, vec![]),
            ],
        )
    }

    #[test]
    fn explanation_reports_each_denial_kind() {
        let engine = engine();

        let unknown = engine.explain_action(&ModuleId::new("sales"), "read", "sales");
        assert_eq!(unknown.denial, Some(DenialKind::ModuleUnknown));

        let inactive = engine.explain_action(&ModuleId::new("payroll"), "read", "payroll");
        assert_eq!(inactive.denial, Some(DenialKind::ModuleInactive));

        let missing = engine.explain_action(&ModuleId::new("inventory"), "delete", "inventory");
        assert_eq!(missing.denial, Some(DenialKind::MissingPermission));

        let granted = engine.explain_action(&ModuleId::new("inventory"), "read", "inventory");
        assert!(granted.granted);
        assert!(granted.denial.is_none());
    }

    #[test]
    fn explanation_agrees_with_the_decision() {
        let engine = engine();
        for (module, action, resource) in [
            ("inventory", "read", "inventory"),
            ("inventory", "write", "inventory"),
            ("payroll", "read", "payroll"),
            ("sales", "read", "sales"),
        ] {
            let module = ModuleId::new(module);
            let explanation = engine.explain_action(&module, action, resource);
            assert_eq!(
                explanation.granted,
                engine.can_perform_action(&module, action, resource),
                "explanation disagrees for {module}/{action}/{resource}"
            );
        }
    }

    #[test]
    fn explanation_serializes_with_snake_case_denial() {
        let engine = engine();
        let explanation = engine.explain_action(&ModuleId::new("payroll"), "read", "payroll");
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["denial"], "module_inactive");
        assert_eq!(json["granted"], false);
    }
}
