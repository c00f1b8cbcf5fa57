//! Session/company binding lifecycle.
//!
//! One `CompanySession` owns the single mutable binding for an active
//! session. Rebuilds are triggered by user appearance, explicit company
//! switches, and logout; every rebuild carries an epoch, and a resolution
//! whose epoch has been superseded is discarded without touching state.
//! Readers only ever see immutable snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use ledgerdesk_authz::DecisionEngine;
use ledgerdesk_core::{CompanyId, UserId};

use crate::collaborators::{CompanyDirectory, IdentityProvider, Notifier};
use crate::error::{FetchError, SessionError};
use crate::normalize::normalize_plan;

/// What triggered the in-flight load. Re-entering an identical trigger is
/// ignored; a different trigger supersedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadCause {
    Resolve(UserId),
    Switch(CompanyId),
}

#[derive(Debug, Default)]
struct SessionState {
    epoch: u64,
    user: Option<UserId>,
    company: Option<CompanyId>,
    engine: Option<Arc<DecisionEngine>>,
    loading: Option<LoadCause>,
    ready_since: Option<DateTime<Utc>>,
}

impl SessionState {
    fn clear_binding(&mut self) {
        self.company = None;
        self.engine = None;
        self.ready_since = None;
    }
}

/// Immutable view of the session handed to gates and the UI tree.
///
/// `engine` is present only in the Ready state; while loading or
/// unauthenticated it is absent and every gate denies. Consumers must
/// re-take a snapshot per query rather than caching one.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<UserId>,
    pub company: Option<CompanyId>,
    pub engine: Option<Arc<DecisionEngine>>,
    pub is_loading: bool,
    /// When the current binding became Ready; absent otherwise.
    pub ready_since: Option<DateTime<Utc>>,
}

/// Owner of the session's binding; the only writer.
///
/// All collaborator failures are absorbed here: downstream components
/// always see a well-formed (possibly empty) binding, never an error.
pub struct CompanySession {
    identity: Arc<dyn IdentityProvider>,
    directory: Arc<dyn CompanyDirectory>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SessionState>,
}

impl CompanySession {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        directory: Arc<dyn CompanyDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            identity,
            directory,
            notifier,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.lock();
        SessionSnapshot {
            user: s.user,
            company: s.company,
            engine: s.engine.clone(),
            is_loading: s.loading.is_some(),
            ready_since: s.ready_since,
        }
    }

    /// The current decision engine, present only when the binding is Ready.
    pub fn engine(&self) -> Option<Arc<DecisionEngine>> {
        self.lock().engine.clone()
    }

    /// Clear the session (logout or user disappearance). Supersedes any
    /// in-flight load.
    pub fn logout(&self) {
        let mut s = self.lock();
        s.epoch += 1;
        s.user = None;
        s.loading = None;
        s.clear_binding();
        tracing::info!("session cleared");
    }

    /// Build the binding for the currently authenticated user.
    ///
    /// No user clears the session; a user without a company association is
    /// fatal (notified, cleared). Re-entering while the same resolve is in
    /// flight is a no-op, as is resolving an already-ready binding for the
    /// same user.
    pub async fn resolve(&self) -> Result<(), SessionError> {
        let Some(user) = self.identity.current_user() else {
            self.logout();
            return Ok(());
        };

        let Some(company_id) = user.company_id else {
            {
                let mut s = self.lock();
                s.epoch += 1;
                s.user = None;
                s.loading = None;
                s.clear_binding();
            }
            tracing::warn!(user = %user.id, "authenticated user has no company association");
            self.notifier
                .notify_error("Your account is not associated with a company.");
            return Err(SessionError::MissingIdentity);
        };

        let epoch = {
            let mut s = self.lock();
            if s.loading == Some(LoadCause::Resolve(user.id)) {
                return Ok(());
            }
            if s.user == Some(user.id) && s.engine.is_some() {
                return Ok(());
            }
            s.epoch += 1;
            s.user = Some(user.id);
            s.loading = Some(LoadCause::Resolve(user.id));
            s.clear_binding();
            s.epoch
        };

        tracing::debug!(user = %user.id, %company_id, "building session binding");
        let outcome = match self.directory.fetch_company(&company_id).await {
            Ok(record) => {
                // Modules may arrive from both the identity and the company
                // record; normalization reconciles the overlap.
                let mut combined = user.plan;
                combined.modules.extend(record.plan.modules);
                Ok(normalize_plan(company_id, &combined))
            }
            Err(err) => Err(err),
        };
        self.apply_loaded(epoch, company_id, outcome)
    }

    /// Rebuild the binding for another company of the same principal.
    ///
    /// Requires an authenticated session. An identical in-flight switch is
    /// ignored; a different one supersedes it. On failure the binding is
    /// cleared and the error surfaced; retry is left to the caller.
    pub async fn switch_company(&self, target: CompanyId) -> Result<(), SessionError> {
        let epoch = {
            let mut s = self.lock();
            if s.user.is_none() {
                return Err(SessionError::MissingIdentity);
            }
            if s.loading == Some(LoadCause::Switch(target)) {
                return Ok(());
            }
            s.epoch += 1;
            s.loading = Some(LoadCause::Switch(target));
            s.clear_binding();
            s.epoch
        };

        tracing::info!(company = %target, "switching active company");
        let outcome = self
            .directory
            .fetch_company(&target)
            .await
            .map(|record| normalize_plan(target, &record.plan));
        self.apply_loaded(epoch, target, outcome)
    }

    /// Commit a finished load, unless a newer trigger superseded it.
    fn apply_loaded(
        &self,
        epoch: u64,
        company_id: CompanyId,
        outcome: Result<DecisionEngine, FetchError>,
    ) -> Result<(), SessionError> {
        let mut s = self.lock();
        if s.epoch != epoch {
            tracing::debug!(%company_id, "discarding superseded binding load");
            return Err(SessionError::Superseded);
        }
        s.loading = None;

        match outcome {
            Ok(engine) => {
                s.engine = Some(Arc::new(engine));
                s.company = Some(company_id);
                s.ready_since = Some(Utc::now());
                tracing::info!(%company_id, "session binding ready");
                Ok(())
            }
            Err(err) => {
                s.clear_binding();
                drop(s);
                tracing::warn!(%company_id, error = %err, "binding load failed, session cleared");
                self.notifier
                    .notify_error(&format!("Failed to load company data: {err}"));
                Err(SessionError::Fetch(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::CompanyRecord;
    use crate::plan::AuthenticatedUser;

    struct NoIdentity;
    impl IdentityProvider for NoIdentity {
        fn current_user(&self) -> Option<AuthenticatedUser> {
            None
        }
    }

    struct UnreachableDirectory;
    #[async_trait::async_trait]
    impl CompanyDirectory for UnreachableDirectory {
        async fn fetch_company(&self, _: &CompanyId) -> Result<CompanyRecord, FetchError> {
            Err(FetchError::Network("unreachable".to_string()))
        }
    }

    struct SilentNotifier;
    impl Notifier for SilentNotifier {
        fn notify_error(&self, _: &str) {}
    }

    fn session() -> CompanySession {
        CompanySession::new(
            Arc::new(NoIdentity),
            Arc::new(UnreachableDirectory),
            Arc::new(SilentNotifier),
        )
    }

    #[test]
    fn initial_snapshot_is_unauthenticated_and_idle() {
        let snapshot = session().snapshot();
        assert!(snapshot.user.is_none());
        assert!(snapshot.company.is_none());
        assert!(snapshot.engine.is_none());
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn switch_without_a_user_is_a_missing_identity_error() {
        let session = session();
        let result = session.switch_company(CompanyId::new()).await;
        assert_eq!(result, Err(SessionError::MissingIdentity));
    }

    #[tokio::test]
    async fn resolve_without_a_user_clears_the_session() {
        let session = session();
        assert_eq!(session.resolve().await, Ok(()));
        let snapshot = session.snapshot();
        assert!(snapshot.user.is_none());
        assert!(snapshot.engine.is_none());
    }
}
