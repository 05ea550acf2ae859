//! Bearer-token persistence in the OS credential store
//!
//! Uses the `keyring` crate to store the token securely in the OS
//! credential store (e.g., GNOME Keyring, KDE Wallet, macOS Keychain)
//! under a single fixed entry, so a restart restores the session without
//! re-entering credentials.

use anyhow::{Context, Result};
use tracing::{debug, info};

use pactlens_core::{domain::AuthToken, ports::ITokenStore};

/// Service name for keyring entries
const KEYRING_SERVICE: &str = "pactlens";

/// Username for the single token entry
const KEYRING_USER: &str = "auth-token";

/// [`ITokenStore`] backed by the system keyring
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn entry() -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ITokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        match Self::entry()?.get_password() {
            Ok(secret) => {
                debug!("Loaded auth token from keyring");
                Ok(Some(AuthToken::new(secret)))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No auth token in keyring");
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to read from keyring")),
        }
    }

    fn store(&self, token: &AuthToken) -> Result<()> {
        Self::entry()?
            .set_password(token.as_str())
            .context("Failed to store token in keyring")?;
        debug!("Stored auth token in keyring");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) => {
                info!("Cleared auth token from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No auth token to clear");
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to delete from keyring")),
        }
    }
}
