//! Route guard: runs the navigation gate against live session state.
//!
//! The decisions come from [`hrdesk_auth::gate`]; this module performs the
//! identity refresh the gate asks for and follows redirects.

use std::sync::Arc;

use hrdesk_auth::gate::{self, GateDecision, GuardState, LOGIN_PATH, normalize_path};
use hrdesk_auth::AuthContext;
use serde::Serialize;

use crate::api::LoginResponse;
use crate::http::ApiClient;
use crate::lov::LovCache;
use crate::navigation::NavigationState;
use crate::session_store::SessionStore;

/// Hops [`RouteGuard::navigate`] follows before giving up.
pub const MAX_REDIRECTS: usize = 4;

/// Terminal result of one gate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Render { path: String, context: AuthContext },
    Redirect { from: String, to: String },
}

/// Where navigation settled, and the redirects taken to get there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arrival {
    pub path: String,
    pub context: AuthContext,
    pub redirects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("too many redirects: {}", .0.join(" -> "))]
    RedirectLoop(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    api: ApiClient,
    session: SessionStore,
    navigation: NavigationState,
    lovs: LovCache,
    warm_lov_types: Arc<[String]>,
}

impl RouteGuard {
    pub fn new(api: ApiClient, lovs: LovCache, warm_lov_types: Vec<String>) -> Self {
        Self {
            session: api.session().clone(),
            navigation: api.navigation().clone(),
            api,
            lovs,
            warm_lov_types: warm_lov_types.into(),
        }
    }

    /// Run the gate once for `path`.
    pub async fn evaluate(&self, path: &str) -> NavigationOutcome {
        let path = normalize_path(path);
        transition(&path, GuardState::Start, GuardState::CheckingSession);

        let mut state = GuardState::CheckingSession;
        let mut decision = gate::check_session(&self.session.get(), &path);
        if decision == GateDecision::RefreshIdentity {
            transition(&path, state, GuardState::RefreshingIdentity);
            state = GuardState::RefreshingIdentity;
            self.refresh_identity().await;
            decision = gate::after_refresh(&self.session.get(), &path);
        }
        transition(&path, state, decision.state());

        match decision {
            GateDecision::Render(context) => {
                if let Some(nav) = context.navigation {
                    self.navigation.set(nav);
                }
                NavigationOutcome::Render { path, context }
            }
            GateDecision::Redirect(to) => {
                tracing::info!(from = %path, to = %to, "redirecting");
                NavigationOutcome::Redirect { from: path, to }
            }
            // Unresolved after a refresh attempt: treat as unauthenticated.
            GateDecision::RefreshIdentity => NavigationOutcome::Redirect {
                from: path,
                to: LOGIN_PATH.to_string(),
            },
        }
    }

    /// Run the gate, following redirects until a page renders.
    pub async fn navigate(&self, path: &str) -> Result<Arrival, GuardError> {
        let mut current = normalize_path(path);
        let mut redirects = Vec::new();

        loop {
            match self.evaluate(&current).await {
                NavigationOutcome::Render { path, context } => {
                    return Ok(Arrival {
                        path,
                        context,
                        redirects,
                    });
                }
                NavigationOutcome::Redirect { to, .. } => {
                    redirects.push(to.clone());
                    if redirects.len() > MAX_REDIRECTS {
                        let mut trail = vec![normalize_path(path)];
                        trail.extend(redirects);
                        tracing::warn!("navigation exceeded {MAX_REDIRECTS} redirects");
                        return Err(GuardError::RedirectLoop(trail));
                    }
                    current = to;
                }
            }
        }
    }

    /// Ask the server who we are. Any failure clears the session.
    async fn refresh_identity(&self) {
        match self.api.auth().me().await {
            Ok(LoginResponse { user, token }) => {
                if let Err(err) = self.session.set_auth(Some(user), token).await {
                    tracing::warn!("failed to persist refreshed identity: {err:?}");
                }
                self.lovs.warm(&self.warm_lov_types).await;
            }
            Err(err) => {
                tracing::info!("identity refresh rejected: {err}");
                if let Err(err) = self.session.clear_auth().await {
                    tracing::warn!("failed to clear persisted session: {err:?}");
                }
            }
        }
    }
}

fn transition(path: &str, from: GuardState, to: GuardState) {
    tracing::debug!(path, ?from, ?to, "guard transition");
}
