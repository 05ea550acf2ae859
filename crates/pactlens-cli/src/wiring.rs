//! Explicit construction of the client object graph
//!
//! Everything is built here and passed down by value or `Arc`; no command
//! reaches for a global. The session store is registered as the sink for
//! unauthorized responses after construction, closing the loop between
//! the HTTP client and the session it authenticates.

use std::sync::Arc;
use std::time::Duration;

use pactlens_api::{ApiClient, AuthApi, ContractsApi, KeyringTokenStore, SharingClient};
use pactlens_core::{
    config::Config,
    ports::{IAuthEvents, IContractsApi, ISharingApi, ITokenStore},
    usecases::{ChangePasswordUseCase, SessionStore},
};
use pactlens_notify::NotificationCenter;

/// The wired application seen by the commands
pub struct App {
    pub session: Arc<SessionStore>,
    pub contracts: Arc<dyn IContractsApi>,
    pub sharing: Arc<dyn ISharingApi>,
    pub change_password: ChangePasswordUseCase,
    pub notifications: NotificationCenter,
}

/// Builds the full object graph from configuration
pub fn bootstrap(config: &Config) -> App {
    let tokens: Arc<dyn ITokenStore> = Arc::new(KeyringTokenStore::new());
    let client = Arc::new(ApiClient::with_timeout(
        config.api.base_url.as_str(),
        Arc::clone(&tokens),
        Duration::from_secs(config.api.timeout_secs),
    ));

    let auth = Arc::new(AuthApi::new(Arc::clone(&client)));
    let session = Arc::new(SessionStore::new(auth.clone(), tokens));
    client.set_auth_events(session.clone() as Arc<dyn IAuthEvents>);

    App {
        session,
        contracts: Arc::new(ContractsApi::new(client)),
        sharing: Arc::new(SharingClient::new(config.api.base_url.as_str())),
        change_password: ChangePasswordUseCase::new(auth),
        notifications: NotificationCenter::with_lifetime(Duration::from_secs(
            config.notifications.lifetime_secs,
        )),
    }
}
