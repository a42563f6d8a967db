//! Current navigation context (which role-scoped section is active).

use std::sync::Arc;

use hrdesk_auth::NavigationContext;
use tokio::sync::watch;

/// Shared handle; clones observe the same value.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: Arc<watch::Sender<NavigationContext>>,
}

impl NavigationState {
    pub fn new(initial: NavigationContext) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            current: Arc::new(tx),
        }
    }

    pub fn get(&self) -> NavigationContext {
        *self.current.borrow()
    }

    pub fn set(&self, context: NavigationContext) {
        let previous = self.current.send_replace(context);
        if previous != context {
            tracing::debug!(from = %previous, to = %context, "navigation context changed");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationContext> {
        self.current.subscribe()
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(NavigationContext::default())
    }
}
