//! Session store: in-memory session mirrored into durable storage.
//!
//! Transitions are computed by [`Session::apply`]; this type only publishes
//! the result and keeps storage in sync with it.

use std::sync::Arc;

use anyhow::Context;
use hrdesk_auth::{Identity, PermissionSet, Session, SessionEvent};
use tokio::sync::watch;

use crate::storage::{DurableStorage, MemoryStorage};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// Cheap to clone; all clones share one session.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
    storage: Arc<dyn DurableStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Load the persisted session, if any. Unreadable or corrupt state
    /// hydrates as anonymous and is discarded.
    pub async fn hydrate(storage: Arc<dyn DurableStorage>) -> Self {
        let session = match load(storage.as_ref()).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("discarding persisted session: {err:?}");
                if let Err(err) = erase(storage.as_ref()).await {
                    tracing::warn!("failed to erase persisted session: {err:?}");
                }
                Session::anonymous()
            }
        };

        if let Some(identity) = &session.identity {
            tracing::info!(user_id = %identity.id, role = %identity.role(), "restored session");
        }

        let (tx, _rx) = watch::channel(session);
        Self {
            state: Arc::new(tx),
            storage,
        }
    }

    /// Anonymous store without durable backing (tests, ephemeral shells).
    pub fn in_memory() -> Self {
        let (tx, _rx) = watch::channel(Session::anonymous());
        Self {
            state: Arc::new(tx),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// Snapshot of the current session.
    pub fn get(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn permissions(&self) -> Option<PermissionSet> {
        self.state.borrow().permissions()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe session changes (login, refresh, logout).
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Set or clear the identity. `None` is equivalent to [`Self::clear_auth`].
    ///
    /// The in-memory session is always updated; the error reports a failure
    /// to mirror it into storage.
    pub async fn set_auth(
        &self,
        identity: Option<Identity>,
        token: Option<String>,
    ) -> anyhow::Result<()> {
        let event = match identity {
            Some(identity) => SessionEvent::Authenticated { identity, token },
            None => SessionEvent::Cleared,
        };
        self.dispatch(event).await
    }

    pub async fn clear_auth(&self) -> anyhow::Result<()> {
        self.dispatch(SessionEvent::Cleared).await
    }

    async fn dispatch(&self, event: SessionEvent) -> anyhow::Result<()> {
        let next = self.state.borrow().apply(event);

        match &next.identity {
            Some(identity) => {
                tracing::info!(user_id = %identity.id, role = %identity.role(), "session established")
            }
            None => tracing::info!("session cleared"),
        }

        self.state.send_replace(next.clone());
        persist(self.storage.as_ref(), &next).await
    }
}

async fn load(storage: &dyn DurableStorage) -> anyhow::Result<Session> {
    let Some(raw) = storage.get(USER_KEY).await? else {
        return Ok(Session::anonymous());
    };
    let identity: Identity =
        serde_json::from_str(&raw).context("persisted identity is not valid JSON")?;
    let token = storage.get(TOKEN_KEY).await?;
    Ok(Session::authenticated(identity, token))
}

async fn persist(storage: &dyn DurableStorage, session: &Session) -> anyhow::Result<()> {
    let Some(identity) = &session.identity else {
        return erase(storage).await;
    };

    let payload = serde_json::to_string(identity).context("failed to serialize identity")?;
    storage.set(USER_KEY, &payload).await?;
    match &session.token {
        Some(token) => storage.set(TOKEN_KEY, token).await,
        None => storage.remove(TOKEN_KEY).await,
    }
}

async fn erase(storage: &dyn DurableStorage) -> anyhow::Result<()> {
    storage.remove(USER_KEY).await?;
    storage.remove(TOKEN_KEY).await
}
