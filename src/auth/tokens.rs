//! Token storage abstraction
//!
//! The backend issues a pair of opaque JWT strings: a short-lived access
//! token and a longer-lived refresh token. The client never inspects them.

use anyhow::Result;

/// Access/refresh token pair as returned by the auth endpoints.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token store trait for different storage backends.
///
/// `Config` persists tokens to the config file; `MemoryTokenStore` backs
/// tests that need session state without touching the filesystem.
pub trait TokenStore: Send {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_access_token(&mut self, token: String);
    fn set_token_pair(&mut self, pair: TokenPair);
    fn clear_tokens(&mut self);

    /// Flush the store to durable storage. In-memory stores keep the default.
    fn persist(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory token store (no persistence).
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    access: Option<String>,
    refresh: Option<String>,
}

impl MemoryTokenStore {
    pub fn new(access: Option<String>, refresh: Option<String>) -> Self {
        Self { access, refresh }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.clone()
    }

    fn set_access_token(&mut self, token: String) {
        self.access = Some(token);
    }

    fn set_token_pair(&mut self, pair: TokenPair) {
        self.access = Some(pair.access);
        self.refresh = Some(pair.refresh);
    }

    fn clear_tokens(&mut self) {
        self.access = None;
        self.refresh = None;
    }
}
