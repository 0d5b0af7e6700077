//! In-memory per-user session map.
//!
//! Sessions are private per user; ordering within one user's identity is
//! assumed to be provided by the transport, so a plain async `RwLock`
//! around the map is all the synchronization needed.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::dialog::state::{DialogState, Session};

/// Lazily-created per-user sessions.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against the user's session, creating it if absent.
    pub async fn with<F, R>(&self, user_id: &str, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut map = self.inner.write().await;
        f(map.entry(user_id.to_string()).or_default())
    }

    /// Peek at the user's current state without creating a session.
    pub async fn state(&self, user_id: &str) -> DialogState {
        self.inner
            .read()
            .await
            .get(user_id)
            .map(|s| s.state)
            .unwrap_or_default()
    }

    /// Reset the user's session to the initial state.
    pub async fn clear(&self, user_id: &str) {
        if let Some(session) = self.inner.write().await.get_mut(user_id) {
            session.reset();
        }
    }
}
