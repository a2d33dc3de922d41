use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::model::Session;

/// Single source of truth for the current session, observable from anywhere
/// a clone of the handle reaches.
///
/// There is exactly one logical writer at a time (the bootstrapper during
/// startup, then user-serialized login/logout), so the store only offers
/// wholesale replacement: observers can never see a half-updated session.
/// Change notification rides a `watch` channel; every receiver read sees the
/// most recently committed state.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Session>>,
}

impl SessionStore {
    /// New store in the `Loading` state, resolved later by the bootstrapper.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::Loading);
        SessionStore { tx: Arc::new(tx) }
    }

    /// Current session snapshot. No side effects, never fails.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Replace the session wholesale. Atomic from the observer's point of
    /// view; subscribers are notified after the new state is committed.
    pub fn replace(&self, next: Session) {
        debug!(target: "session", "session replace: {:?} -> {:?}", state_name(&self.tx.borrow()), state_name(&next));
        self.tx.send_replace(next);
    }

    /// Reset to `Anonymous`. The logout flow additionally wipes the
    /// persisted mirror; this only touches in-memory state.
    pub fn clear(&self) {
        self.replace(Session::Anonymous);
    }

    /// Subscribe to session changes. The receiver immediately holds the
    /// current state and is marked changed on every `replace`.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn state_name(s: &Session) -> &'static str {
    match s {
        Session::Loading => "loading",
        Session::Anonymous => "anonymous",
        Session::Authenticated(_) => "authenticated",
    }
}
