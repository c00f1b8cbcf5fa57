//! Session error taxonomy.
//!
//! Denial is never an error: authorization queries answer booleans. These
//! variants cover identity and collaborator failures only.

use thiserror::Error;

/// Failure reported by the company-data collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authorized to read company data")]
    Unauthorized,

    #[error("company not found")]
    NotFound,
}

/// Failure of a binding build/rebuild.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The authenticated principal has no resolvable company association.
    /// Fatal to the session: the binding is cleared.
    #[error("authenticated user has no company association")]
    MissingIdentity,

    /// Company-data fetch failed. Transient; surfaced to the user and the
    /// binding is cleared. Retry happens only through a new user-triggered
    /// attempt.
    #[error("company data fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A newer trigger superseded this load while it was in flight. No
    /// state was touched and nothing was surfaced to the user.
    #[error("superseded by a newer session trigger")]
    Superseded,
}
