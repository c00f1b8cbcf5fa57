//! `ledgerdesk-core` — shared domain foundation for the access-control core.
//!
//! This crate contains identifiers and error types only; no policy, no I/O.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CompanyId, UserId};
