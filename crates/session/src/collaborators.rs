//! Collaborator seams implemented by the embedding application.
//!
//! The session crate performs no authentication and no transport itself;
//! it consumes these interfaces and turns their data into bindings.

use serde::{Deserialize, Serialize};

use ledgerdesk_core::CompanyId;

use crate::error::FetchError;
use crate::plan::{AuthenticatedUser, RawPlan};

/// Source of the currently authenticated principal.
pub trait IdentityProvider: Send + Sync {
    /// `None` means no authenticated session (logged out or expired).
    fn current_user(&self) -> Option<AuthenticatedUser>;
}

/// Company data as returned by the directory collaborator. The plan is
/// company-owned, so a switch target's subscription arrives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub plan: RawPlan,
}

/// Asynchronous company-data source. The only suspending call in the
/// binding lifecycle; its timeout/retry policy is the collaborator's own.
#[async_trait::async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn fetch_company(&self, company_id: &CompanyId) -> Result<CompanyRecord, FetchError>;
}

/// User-visible failure surfacing. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}
