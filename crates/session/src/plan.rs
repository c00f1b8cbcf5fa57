//! Raw subscription plan as supplied by the identity collaborator.
//!
//! This is the un-normalized wire shape: module entries may be missing
//! their id, permission list, or activation flag. Normalization
//! (`normalize_plan`) turns it into the decision engine's inputs with
//! fail-closed defaults.

use serde::{Deserialize, Serialize};

use ledgerdesk_core::{CompanyId, UserId};

/// A company subscription plan before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub modules: Vec<RawModule>,
}

/// One raw subscribed-module entry.
///
/// Any field may be absent. Identity resolution prefers `id`, then
/// `module_key`; missing `permission` means no permissions and missing
/// `is_active` means inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub module_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permission: Option<Vec<String>>,
    #[serde(default, alias = "isActive")]
    pub is_active: Option<bool>,
}

/// The authenticated principal as handed over by the identity collaborator.
///
/// The embedded plan is the subscription of the login company; plans for
/// other companies arrive with their fetched company records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    #[serde(default, alias = "companyId")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub plan: RawPlan,
}
