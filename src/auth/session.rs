//! Session state shared between the request gateway and the auth flows.
//!
//! The token pair lives in a single injected store rather than ambient
//! global state, so the gateway can be exercised against an in-memory store
//! in tests. Mutations persist through the store after each change.

use std::sync::Mutex;

use super::tokens::{TokenPair, TokenStore};

/// Authentication context: token storage plus the refresh coordination gate.
pub struct Session<S: TokenStore> {
    store: Mutex<S>,
    /// Serializes refresh-token exchanges. A 401 handler that loses the race
    /// re-reads the store after acquiring the gate and reuses the token the
    /// winner installed instead of issuing a second exchange.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.lock().expect("token store poisoned").access_token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.lock().expect("token store poisoned").refresh_token()
    }

    pub fn store_access_token(&self, token: String) {
        let mut store = self.store.lock().expect("token store poisoned");
        store.set_access_token(token);
        if let Err(e) = store.persist() {
            tracing::warn!("Failed to persist access token: {:#}", e);
        }
    }

    pub fn store_token_pair(&self, pair: TokenPair) {
        let mut store = self.store.lock().expect("token store poisoned");
        store.set_token_pair(pair);
        if let Err(e) = store.persist() {
            tracing::warn!("Failed to persist token pair: {:#}", e);
        }
    }

    pub fn clear(&self) {
        let mut store = self.store.lock().expect("token store poisoned");
        store.clear_tokens();
        if let Err(e) = store.persist() {
            tracing::warn!("Failed to persist cleared session: {:#}", e);
        }
    }

    /// Acquire the single-flight refresh gate. Held across the refresh
    /// exchange so concurrent 401 handlers line up behind one exchange.
    pub async fn lock_refresh(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::MemoryTokenStore;

    #[test]
    fn session_replaces_access_token_only() {
        let session = Session::new(MemoryTokenStore::new(
            Some("A1".into()),
            Some("R1".into()),
        ));
        session.store_access_token("A2".into());
        assert_eq!(session.access_token().as_deref(), Some("A2"));
        assert_eq!(session.refresh_token().as_deref(), Some("R1"));
    }

    #[test]
    fn clear_wipes_the_pair() {
        let session = Session::new(MemoryTokenStore::new(
            Some("A1".into()),
            Some("R1".into()),
        ));
        session.clear();
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }
}
