use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::permissions::Permission;

/// Identity of a licensable module (e.g. `"inventory"`, `"sales"`).
///
/// Module identities are plan-supplied keys, not UUIDs; they are opaque at
/// this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(Cow<'static, str>);

impl ModuleId {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One subscribed module's grant for the active company.
///
/// # Invariants
/// - `is_active` is the single usability gate for the module, independent
///   of whether any permissions are present.
/// - A module absent from a binding is equivalent to `is_active = false`
///   with no permissions (closed world: unlisted means denied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub module_id: ModuleId,
    pub is_active: bool,
    pub permissions: Vec<Permission>,
}

impl ModuleAccess {
    pub fn new(module_id: ModuleId, is_active: bool, permissions: Vec<Permission>) -> Self {
        Self {
            module_id,
            is_active,
            permissions,
        }
    }
}
