use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Coarse permission grant in its flattened string form.
///
/// Grants are opaque strings of the shape `"<module-id>:<token>"` (e.g.
/// `"inventory:read"`). This is the namespace that `has_permission` and
/// friends operate over; it is deliberately distinct from the fine-grained
/// [`Permission`] pairs used by action checks, and the two are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grant(Cow<'static, str>);

impl Grant {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    /// Build the flattened grant for one (module, permission token) pair.
    pub fn scoped(module_id: &crate::ModuleId, token: &str) -> Self {
        Self(Cow::Owned(format!("{}:{}", module_id.as_str(), token)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Grant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fine-grained capability: an `(action, resource)` pair.
///
/// Both fields are open vocabularies; equality is exact string match on
/// both. No canonical enumeration is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub action: String,
    pub resource: String,
}

impl Permission {
    pub fn new(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: resource.into(),
        }
    }

    pub fn matches(&self, action: &str, resource: &str) -> bool {
        self.action == action && self.resource == resource
    }
}
