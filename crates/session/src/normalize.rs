//! Raw-plan normalization.
//!
//! Turns the identity collaborator's loose wire shape into the decision
//! engine's inputs. All defaults are fail-closed: a module with no
//! activation flag is inactive, a module with no permission list grants
//! nothing, and a module listed twice is reconciled rather than duplicated.

use std::collections::{HashMap, HashSet};

use ledgerdesk_core::CompanyId;
use ledgerdesk_authz::{DecisionEngine, Grant, ModuleAccess, ModuleId, Permission};
use uuid::Uuid;

use crate::plan::{RawModule, RawPlan};

/// Normalize a company's raw plan into a ready decision engine.
///
/// Deterministic and idempotent: normalizing the same plan for the same
/// company twice yields equal engines, including for modules that carry
/// neither `id` nor `module_key` (their identity is derived from the
/// company id and the entry's position, not drawn at random).
pub fn normalize_plan(company_id: CompanyId, plan: &RawPlan) -> DecisionEngine {
    let mut grants: HashSet<Grant> = HashSet::new();
    let mut modules: Vec<ModuleAccess> = Vec::new();
    let mut index_by_id: HashMap<ModuleId, usize> = HashMap::new();

    for (ordinal, raw) in plan.modules.iter().enumerate() {
        let module_id = stable_identity(company_id, ordinal, raw);
        let is_active = raw.is_active.unwrap_or(false);
        let tokens: &[String] = raw.permission.as_deref().unwrap_or(&[]);

        for token in tokens {
            grants.insert(Grant::scoped(&module_id, token));
        }
        let permissions: Vec<Permission> = tokens
            .iter()
            .map(|token| permission_from_token(&module_id, token))
            .collect();

        match index_by_id.get(&module_id) {
            Some(&i) => {
                // Same module from more than one source: first occurrence
                // keeps its position, permissions are unioned in first-seen
                // order, and any source activating the module activates it.
                let existing = &mut modules[i];
                existing.is_active |= is_active;
                for permission in permissions {
                    if !existing.permissions.contains(&permission) {
                        existing.permissions.push(permission);
                    }
                }
            }
            None => {
                index_by_id.insert(module_id.clone(), modules.len());
                modules.push(ModuleAccess::new(module_id, is_active, permissions));
            }
        }
    }

    tracing::debug!(
        %company_id,
        modules = modules.len(),
        grants = grants.len(),
        "normalized company plan"
    );

    DecisionEngine::new(grants, modules)
}

/// Resolve a raw module's stable identity.
///
/// Prefers `id`, then `module_key`. When both are absent the identity is
/// derived from the company id and the entry's ordinal (UUIDv5), so it is
/// stable across repeated normalizations of the same plan but never
/// collides with a keyed module.
fn stable_identity(company_id: CompanyId, ordinal: usize, raw: &RawModule) -> ModuleId {
    if let Some(id) = present(&raw.id) {
        return ModuleId::new(id.to_string());
    }
    if let Some(key) = present(&raw.module_key) {
        return ModuleId::new(key.to_string());
    }
    let derived = Uuid::new_v5(
        company_id.as_uuid(),
        format!("module#{ordinal}").as_bytes(),
    );
    ModuleId::new(derived.to_string())
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Map one permission token to its fine-grained pair.
///
/// A token of the form `action:resource` splits into both fields; a bare
/// token is an action on the module itself.
fn permission_from_token(module_id: &ModuleId, token: &str) -> Permission {
    match token.split_once(':') {
        Some((action, resource)) => Permission::new(action, resource),
        None => Permission::new(token, module_id.as_str().to_string()),
    }
}
