//! Navigation gate policy.
//!
//! One state machine decides every redirect, so no two call sites can
//! disagree about where a user belongs:
//!
//! ```text
//! Start -> CheckingSession -+-> Authorized                  (identity present, route allowed)
//!                           +-> Authorized                  (no identity, public route)
//!                           +-> Redirecting                 (identity present, public or foreign route)
//!                           +-> RefreshingIdentity -+-> Authorized / Redirecting
//!                                                   +-> Redirecting (/login, fail-closed)
//! ```
//!
//! The functions here only decide; performing the refresh and following the
//! redirect is the client's job.

use serde::Serialize;

use crate::permissions::PermissionSet;
use crate::roles::{NavigationContext, UserRole};
use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Lifecycle of one gate invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Start,
    CheckingSession,
    RefreshingIdentity,
    Authorized,
    Redirecting,
}

/// Role-scoped area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Admin,
    Manager,
    My,
}

impl Section {
    pub fn allows(&self, role: UserRole) -> bool {
        match self {
            Section::Admin => role == UserRole::Admin,
            Section::Manager => matches!(role, UserRole::Admin | UserRole::Manager),
            Section::My => true,
        }
    }

    pub fn navigation_context(&self) -> NavigationContext {
        match self {
            Section::Admin => NavigationContext::Admin,
            Section::Manager => NavigationContext::Manager,
            Section::My => NavigationContext::Staff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login and root: rendered without a session.
    Public,
    /// Everything else; `None` for legacy top-level pages outside a section.
    Protected(Option<Section>),
}

/// Drop query string, fragment and trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub fn classify(path: &str) -> RouteClass {
    let path = normalize_path(path);
    if path == ROOT_PATH || path == LOGIN_PATH {
        return RouteClass::Public;
    }

    let section = match path.trim_start_matches('/').split('/').next() {
        Some("admin") => Some(Section::Admin),
        Some("manager") => Some(Section::Manager),
        Some("my") => Some(Section::My),
        _ => None,
    };
    RouteClass::Protected(section)
}

/// What a rendered page gets to know about the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub role: Option<UserRole>,
    pub permissions: Option<PermissionSet>,
    /// Section context to tag outgoing requests with, when the route has one.
    pub navigation: Option<NavigationContext>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            role: None,
            permissions: None,
            navigation: None,
        }
    }

    fn for_session(session: &Session, section: Option<Section>) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            role: session.role(),
            permissions: session.permissions(),
            navigation: section.map(|s| s.navigation_context()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render(AuthContext),
    Redirect(String),
    /// No identity on a protected route: ask the server who we are.
    RefreshIdentity,
}

impl GateDecision {
    pub fn state(&self) -> GuardState {
        match self {
            GateDecision::Render(_) => GuardState::Authorized,
            GateDecision::Redirect(_) => GuardState::Redirecting,
            GateDecision::RefreshIdentity => GuardState::RefreshingIdentity,
        }
    }
}

/// `CheckingSession`: decide from the session snapshot alone.
pub fn check_session(session: &Session, path: &str) -> GateDecision {
    let route = classify(path);
    let Some(role) = session.role() else {
        return match route {
            RouteClass::Public => GateDecision::Render(AuthContext::anonymous()),
            RouteClass::Protected(_) => GateDecision::RefreshIdentity,
        };
    };

    match route {
        RouteClass::Public => GateDecision::Redirect(role.home_path().to_string()),
        RouteClass::Protected(Some(section)) if !section.allows(role) => {
            GateDecision::Redirect(role.home_path().to_string())
        }
        RouteClass::Protected(section) => {
            GateDecision::Render(AuthContext::for_session(session, section))
        }
    }
}

/// `RefreshingIdentity` resolved: the session as it stands after the refresh
/// attempt (cleared on failure).
pub fn after_refresh(session: &Session, path: &str) -> GateDecision {
    if session.is_authenticated() {
        check_session(session, path)
    } else {
        GateDecision::Redirect(LOGIN_PATH.to_string())
    }
}
