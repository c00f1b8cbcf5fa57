//! `ledgerdesk-session` — session/company binding builder.
//!
//! Owns the single mutable binding per active session: normalizes raw
//! subscription plans into the decision engine's inputs, and rebuilds the
//! binding on login, company switch, and logout. Everything downstream
//! (gates, UI) reads immutable snapshots.

pub mod collaborators;
pub mod error;
pub mod normalize;
pub mod plan;
pub mod session;

pub use collaborators::{CompanyDirectory, CompanyRecord, IdentityProvider, Notifier};
pub use error::{FetchError, SessionError};
pub use normalize::normalize_plan;
pub use plan::{AuthenticatedUser, RawModule, RawPlan};
pub use session::{CompanySession, SessionSnapshot};
