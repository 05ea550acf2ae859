//! Token store port (driven/secondary port)
//!
//! The persisted bearer token is the only durable shared resource in the
//! client. It is read at startup and on every outgoing authenticated call,
//! written only by login/registration, and cleared only by logout or an
//! authentication rejection. No other component may write it.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because storage errors are adapter-specific
//!   (OS keyring, in-memory) and don't need domain-level classification.
//! - Synchronous by design: logout must clear state without awaiting.

use std::sync::Mutex;

use crate::domain::AuthToken;

/// Port trait for the single persisted bearer token
pub trait ITokenStore: Send + Sync {
    /// Loads the persisted token, if one exists
    fn load(&self) -> anyhow::Result<Option<AuthToken>>;

    /// Persists the token, replacing any previous value
    fn store(&self, token: &AuthToken) -> anyhow::Result<()>;

    /// Removes the persisted token. Clearing an absent token is a no-op.
    fn clear(&self) -> anyhow::Result<()>;
}

/// In-memory token store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl ITokenStore for MemoryTokenStore {
    fn load(&self) -> anyhow::Result<Option<AuthToken>> {
        Ok(self.token.lock().expect("token store lock poisoned").clone())
    }

    fn store(&self, token: &AuthToken) -> anyhow::Result<()> {
        *self.token.lock().expect("token store lock poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.token.lock().expect("token store lock poisoned") = None;
        Ok(())
    }
}
