//! Session state and its pure transitions.
//!
//! Persistence is not handled here; the client crate's session store applies
//! a transition, then mirrors the resulting value into durable storage.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::permissions::{PermissionSet, derive_for_role};
use crate::roles::UserRole;

/// Current authentication state of the process.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub identity: Option<Identity>,
    /// Bearer credential returned by login / identity refresh, if any.
    pub token: Option<String>,
}

/// A requested change to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A fresh identity was established (login or refresh).
    ///
    /// `token: None` keeps the previously held credential; cookie-only
    /// deployments never return one.
    Authenticated {
        identity: Identity,
        token: Option<String>,
    },
    /// Logout, explicit `set_auth(None)`, or an authentication rejection.
    Cleared,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity, token: Option<String>) -> Self {
        Self {
            identity: Some(identity),
            token,
        }
    }

    /// Compute the next session. Whole-value replacement, never partial.
    #[must_use]
    pub fn apply(&self, event: SessionEvent) -> Session {
        match event {
            SessionEvent::Authenticated { identity, token } => Session {
                identity: Some(identity),
                token: token.or_else(|| self.token.clone()),
            },
            SessionEvent::Cleared => Session::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity.as_ref().map(Identity::role)
    }

    /// Permissions for the current identity, recomputed on every call so they
    /// can never drift from the role.
    pub fn permissions(&self) -> Option<PermissionSet> {
        self.role().map(derive_for_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrdesk_core::UserId;

    fn identity(role: UserRole) -> Identity {
        Identity::new(UserId::new("u1").unwrap(), "a@example.com", role)
    }

    #[test]
    fn authenticate_then_clear() {
        let s = Session::anonymous().apply(SessionEvent::Authenticated {
            identity: identity(UserRole::Admin),
            token: Some("t1".into()),
        });
        assert!(s.is_authenticated());
        assert_eq!(s.role(), Some(UserRole::Admin));
        assert_eq!(s.token.as_deref(), Some("t1"));

        let cleared = s.apply(SessionEvent::Cleared);
        assert_eq!(cleared, Session::anonymous());
        assert_eq!(cleared.permissions(), None);
    }

    #[test]
    fn refresh_without_token_keeps_credential() {
        let s = Session::authenticated(identity(UserRole::Staff), Some("t1".into()));
        let refreshed = s.apply(SessionEvent::Authenticated {
            identity: identity(UserRole::Manager),
            token: None,
        });
        assert_eq!(refreshed.token.as_deref(), Some("t1"));
        assert_eq!(refreshed.role(), Some(UserRole::Manager));
    }

    #[test]
    fn permissions_follow_role_changes() {
        let s = Session::authenticated(identity(UserRole::Staff), None);
        assert!(!s.permissions().unwrap().can_approve.leaves);

        let promoted = s.apply(SessionEvent::Authenticated {
            identity: identity(UserRole::Manager),
            token: None,
        });
        assert!(promoted.permissions().unwrap().can_approve.leaves);
    }
}
