//! Static module catalog for discovery/listing.
//!
//! The catalog is an explicitly constructed, immutable value handed to the
//! components that need module discovery. It plays no part in authorization
//! decisions; those go through the decision engine alone.

use serde::Serialize;

use ledgerdesk_core::DomainError;

use crate::engine::DecisionEngine;
use crate::module_access::ModuleId;
use crate::permissions::Grant;

/// One optionally-available module, as registered at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    /// Coarse grants a principal must hold for the module to show up in
    /// discovery listings.
    pub required_grants: Vec<Grant>,
}

impl ModuleDescriptor {
    pub fn new(
        id: ModuleId,
        name: impl Into<String>,
        description: impl Into<String>,
        required_grants: Vec<Grant>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            required_grants,
        }
    }
}

/// Immutable registry of all optionally-available modules.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleCatalog {
    entries: Vec<ModuleDescriptor>,
}

impl ModuleCatalog {
    /// Build a catalog, rejecting duplicate module ids.
    pub fn new(entries: Vec<ModuleDescriptor>) -> Result<Self, DomainError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(DomainError::validation(format!(
                    "duplicate catalog module id '{}'",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.entries
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleDescriptor> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries whose required grants all hold for `engine`.
    ///
    /// An entry with no required grants is discoverable by every principal;
    /// this leans on the vacuous-truth semantics of `has_all_permissions`.
    pub fn discoverable<'a>(&'a self, engine: &DecisionEngine) -> Vec<&'a ModuleDescriptor> {
        self.entries
            .iter()
            .filter(|e| engine.has_all_permissions(&e.required_grants))
            .collect()
    }
}
