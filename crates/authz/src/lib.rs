//! `ledgerdesk-authz` — pure authorization core (decision engine + gates).
//!
//! This crate is intentionally decoupled from transport, storage, and UI.
//! It is constructed from an already-normalized binding and answers every
//! access question synchronously.

pub mod catalog;
pub mod engine;
pub mod explain;
pub mod guard;
pub mod module_access;
pub mod permissions;

pub use catalog::{ModuleCatalog, ModuleDescriptor};
pub use engine::DecisionEngine;
pub use explain::{AccessExplanation, DenialKind};
pub use guard::{
    ActionRequirement, Gate, ModuleGate, PermissionGate, RouteDecision, RouteGuard, all_pass,
};
pub use module_access::{ModuleAccess, ModuleId};
pub use permissions::{Grant, Permission};
