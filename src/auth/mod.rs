//! Authentication module for the Yonna Akademia platform
//!
//! Credential login against the backend's JWT endpoints, plus federated
//! login by exchanging a Google ID token. The session state (token pair)
//! is owned here and injected into the request gateway.

pub mod flows;
pub mod session;
pub mod tokens;

pub use flows::{change_password, login, login_google, logout, register, status};
pub use session::Session;
pub use tokens::{MemoryTokenStore, TokenPair, TokenStore};
