//! Session store use case
//!
//! Single authority on "is there a usable authenticated identity right
//! now". Orchestrates token persistence and user resolution through the
//! auth API and token store ports, and implements the process-wide
//! reaction to authentication rejection.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use tracing::{debug, info, warn};

use crate::{
    domain::{Session, User},
    ports::{Credentials, IAuthApi, IAuthEvents, ITokenStore, Registration},
};

/// Outcome of a login or registration attempt.
///
/// Transport and backend failures never propagate past this boundary;
/// they surface as a user-displayable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The session is now authenticated
    Success,
    /// The attempt failed with a displayable message
    Failed {
        /// Backend `detail` verbatim, or a generic fallback
        error: String,
    },
}

impl AuthOutcome {
    /// True on success
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    fn failed(error: String) -> Self {
        AuthOutcome::Failed { error }
    }
}

/// What a protected view should do given the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewGate {
    /// Startup check still running: render neither content nor redirect
    Pending,
    /// A user is present: render protected content
    Render,
    /// No user: redirect to the sign-in entry point
    RedirectToSignIn,
}

impl ViewGate {
    /// The gating rule every protected view applies
    pub fn for_session(session: &Session) -> Self {
        if session.is_loading() {
            ViewGate::Pending
        } else if session.is_authenticated() {
            ViewGate::Render
        } else {
            ViewGate::RedirectToSignIn
        }
    }
}

/// Use case owning the client's authentication state.
///
/// Constructed once at startup and passed explicitly to whatever needs it;
/// there is deliberately no global instance.
pub struct SessionStore {
    auth_api: Arc<dyn IAuthApi>,
    token_store: Arc<dyn ITokenStore>,
    state: Mutex<Session>,
    login_required: AtomicBool,
}

impl SessionStore {
    /// Creates a session store in the starting (loading) state
    pub fn new(auth_api: Arc<dyn IAuthApi>, token_store: Arc<dyn ITokenStore>) -> Self {
        Self {
            auth_api,
            token_store,
            state: Mutex::new(Session::starting()),
            login_required: AtomicBool::new(false),
        }
    }

    /// A snapshot of the current session state
    pub fn session(&self) -> Session {
        self.state.lock().expect("session lock poisoned").clone()
    }

    /// What a protected view should do right now
    pub fn gate(&self) -> ViewGate {
        ViewGate::for_session(&self.session())
    }

    /// True once an authentication rejection has forced a return to
    /// sign-in. Latched by [`IAuthEvents::unauthorized`]; cleared by the
    /// next successful login or registration.
    pub fn login_required(&self) -> bool {
        self.login_required.load(Ordering::SeqCst)
    }

    /// Startup token check.
    ///
    /// If a persisted token exists, attempts to resolve the current user.
    /// Any failure (including an explicit unauthorized rejection) discards
    /// the persisted token and leaves the session anonymous. Always
    /// completes: this is the only path that clears `loading`.
    pub async fn initialize(&self) {
        let persisted = match self.token_store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read persisted token: {e:#}");
                None
            }
        };

        if let Some(token) = persisted {
            debug!("Persisted token found, resolving user");
            self.state
                .lock()
                .expect("session lock poisoned")
                .set_token(token);

            match self.auth_api.current_user().await {
                Ok(user) => {
                    info!(email = %user.email, "Session restored from persisted token");
                    self.state
                        .lock()
                        .expect("session lock poisoned")
                        .set_user(user);
                }
                Err(e) => {
                    debug!("Persisted token rejected, discarding: {e}");
                    if let Err(e) = self.token_store.clear() {
                        warn!("Failed to clear persisted token: {e:#}");
                    }
                    self.state.lock().expect("session lock poisoned").clear();
                }
            }
        }

        self.state
            .lock()
            .expect("session lock poisoned")
            .finish_loading();
    }

    /// Exchanges credentials for a token and resolves the user.
    ///
    /// If the login response omits the user object, a follow-up
    /// `current_user` call resolves it; if that follow-up fails, the
    /// session is still authenticated with a minimal email-only fallback
    /// identity until the next full resolution. The exception is a
    /// rejection that clears the session through the auth-events sink,
    /// which is reported as a failed login.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let response = match self.auth_api.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Login rejected: {e}");
                return AuthOutcome::failed(e.user_message("Login failed"));
            }
        };

        if let Err(e) = self.token_store.store(&response.access_token) {
            warn!("Failed to persist auth token: {e:#}");
        }
        self.state
            .lock()
            .expect("session lock poisoned")
            .set_token(response.access_token);

        let user = match response.user {
            Some(user) => user,
            None => match self.auth_api.current_user().await {
                Ok(user) => user,
                Err(e) => {
                    // A 401 on the follow-up dispatches through the
                    // auth-events sink and has already cleared the session;
                    // reporting success over an anonymous session would be
                    // a lie to the caller.
                    if self
                        .state
                        .lock()
                        .expect("session lock poisoned")
                        .token()
                        .is_none()
                    {
                        debug!("Session cleared while resolving user after login: {e}");
                        return AuthOutcome::failed(e.user_message("Login failed"));
                    }
                    // Token exchange succeeded, so the session counts as
                    // authenticated; identity degrades to the submitted email.
                    warn!("User resolution failed after login, using fallback identity: {e}");
                    User::fallback(&credentials.email)
                }
            },
        };

        info!(email = %user.email, "Logged in");
        self.state
            .lock()
            .expect("session lock poisoned")
            .set_user(user);
        self.login_required.store(false, Ordering::SeqCst);
        AuthOutcome::Success
    }

    /// Creates a new account. The registration response always includes
    /// both token and user.
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        let response = match self.auth_api.register(registration).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Registration rejected: {e}");
                return AuthOutcome::failed(e.user_message("Registration failed"));
            }
        };

        if let Err(e) = self.token_store.store(&response.access_token) {
            warn!("Failed to persist auth token: {e:#}");
        }

        info!(email = %response.user.email, "Registered");
        self.state
            .lock()
            .expect("session lock poisoned")
            .authenticate(response.access_token, response.user);
        self.login_required.store(false, Ordering::SeqCst);
        AuthOutcome::Success
    }

    /// Clears the persisted token and the in-memory session synchronously.
    /// No network call; idempotent.
    pub fn logout(&self) {
        if let Err(e) = self.token_store.clear() {
            warn!("Failed to clear persisted token: {e:#}");
        }
        self.state.lock().expect("session lock poisoned").clear();
        debug!("Logged out");
    }
}

impl IAuthEvents for SessionStore {
    /// Any unauthorized response anywhere forces the same clearing as
    /// `logout` plus a latched redirect to sign-in.
    fn unauthorized(&self) {
        info!("Authentication rejected, clearing session");
        self.logout();
        self.login_required.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthToken, Email};
    use crate::ports::{ApiError, LoginResponse, MemoryTokenStore, RegisterResponse};
    use std::sync::atomic::AtomicUsize;

    /// Scriptable IAuthApi double counting calls per endpoint
    #[derive(Default)]
    struct FakeAuthApi {
        login_response: Mutex<Option<Result<LoginResponse, ApiError>>>,
        register_response: Mutex<Option<Result<RegisterResponse, ApiError>>>,
        current_user_response: Mutex<Option<Result<User, ApiError>>>,
        current_user_calls: AtomicUsize,
    }

    impl FakeAuthApi {
        fn current_user_calls(&self) -> usize {
            self.current_user_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl IAuthApi for FakeAuthApi {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
            self.login_response
                .lock()
                .unwrap()
                .take()
                .expect("unexpected login call")
        }

        async fn register(
            &self,
            _registration: &Registration,
        ) -> Result<RegisterResponse, ApiError> {
            self.register_response
                .lock()
                .unwrap()
                .take()
                .expect("unexpected register call")
        }

        async fn current_user(&self) -> Result<User, ApiError> {
            self.current_user_calls.fetch_add(1, Ordering::SeqCst);
            self.current_user_response
                .lock()
                .unwrap()
                .take()
                .expect("unexpected current_user call")
        }

        async fn request_password_reset(&self, _email: &Email) -> Result<(), ApiError> {
            unimplemented!("not exercised here")
        }

        async fn confirm_password_reset(
            &self,
            _reset_token: &str,
            _new_password: &str,
        ) -> Result<(), ApiError> {
            unimplemented!("not exercised here")
        }

        async fn update_password(
            &self,
            _current_password: &str,
            _new_password: &str,
        ) -> Result<(), ApiError> {
            unimplemented!("not exercised here")
        }
    }

    fn user() -> User {
        User {
            id: Some("u-1".into()),
            email: "alice@example.com".into(),
            full_name: None,
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: Email::new("alice@example.com").unwrap(),
            password: "hunter22".into(),
        }
    }

    #[tokio::test]
    async fn initialize_without_token_finishes_anonymous() {
        let api = Arc::new(FakeAuthApi::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api.clone(), tokens);

        assert_eq!(store.gate(), ViewGate::Pending);
        store.initialize().await;

        let session = store.session();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(store.gate(), ViewGate::RedirectToSignIn);
        assert_eq!(api.current_user_calls(), 0);
    }

    #[tokio::test]
    async fn initialize_restores_session_from_valid_token() {
        let api = Arc::new(FakeAuthApi::default());
        *api.current_user_response.lock().unwrap() = Some(Ok(user()));
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("tok-1")));
        let store = SessionStore::new(api, tokens.clone());

        store.initialize().await;

        let session = store.session();
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().email, "alice@example.com");
        assert_eq!(store.gate(), ViewGate::Render);
        assert!(tokens.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn initialize_discards_rejected_token() {
        let api = Arc::new(FakeAuthApi::default());
        *api.current_user_response.lock().unwrap() =
            Some(Err(ApiError::Unauthorized("expired".into())));
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("stale")));
        let store = SessionStore::new(api, tokens.clone());

        store.initialize().await;

        let session = store.session();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(tokens.load().unwrap().is_none(), "stale token must be discarded");
    }

    #[tokio::test]
    async fn login_uses_inline_user_without_second_call() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() = Some(Ok(LoginResponse {
            access_token: AuthToken::new("tok-1"),
            user: Some(user()),
        }));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api.clone(), tokens.clone());

        let outcome = store.login(&credentials()).await;

        assert!(outcome.is_success());
        assert_eq!(api.current_user_calls(), 0);
        assert_eq!(tokens.load().unwrap().unwrap().as_str(), "tok-1");
        assert!(store.session().is_authenticated());
    }

    #[tokio::test]
    async fn login_resolves_user_when_response_omits_it() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() = Some(Ok(LoginResponse {
            access_token: AuthToken::new("tok-1"),
            user: None,
        }));
        *api.current_user_response.lock().unwrap() = Some(Ok(user()));
        let store = SessionStore::new(api.clone(), Arc::new(MemoryTokenStore::new()));

        let outcome = store.login(&credentials()).await;

        assert!(outcome.is_success());
        assert_eq!(api.current_user_calls(), 1);
        assert!(!store.session().user().unwrap().is_degraded());
    }

    #[tokio::test]
    async fn login_falls_back_to_email_identity_when_resolution_fails() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() = Some(Ok(LoginResponse {
            access_token: AuthToken::new("tok-1"),
            user: None,
        }));
        *api.current_user_response.lock().unwrap() =
            Some(Err(ApiError::Network("connection reset".into())));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api, tokens.clone());

        let outcome = store.login(&credentials()).await;

        // Token is valid, so the session is authenticated with a degraded identity.
        assert!(outcome.is_success());
        let session = store.session();
        let user = session.user().unwrap();
        assert!(user.is_degraded());
        assert_eq!(user.email, "alice@example.com");
        assert!(tokens.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn login_failure_surfaces_backend_detail() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() = Some(Err(ApiError::Rejected {
            detail: "Incorrect email or password".into(),
        }));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api, tokens.clone());

        let outcome = store.login(&credentials()).await;

        assert_eq!(
            outcome,
            AuthOutcome::Failed {
                error: "Incorrect email or password".into()
            }
        );
        assert!(tokens.load().unwrap().is_none());
        assert!(!store.session().is_authenticated());
    }

    #[tokio::test]
    async fn login_failure_uses_generic_message_without_detail() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() =
            Some(Err(ApiError::Network("connection refused".into())));
        let store = SessionStore::new(api, Arc::new(MemoryTokenStore::new()));

        let outcome = store.login(&credentials()).await;

        assert_eq!(
            outcome,
            AuthOutcome::Failed {
                error: "Login failed".into()
            }
        );
    }

    #[tokio::test]
    async fn register_stores_token_and_user() {
        let api = Arc::new(FakeAuthApi::default());
        *api.register_response.lock().unwrap() = Some(Ok(RegisterResponse {
            access_token: AuthToken::new("tok-new"),
            user: user(),
        }));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api, tokens.clone());

        let outcome = store
            .register(&Registration {
                email: Email::new("alice@example.com").unwrap(),
                password: "hunter22".into(),
                full_name: Some("Alice".into()),
            })
            .await;

        assert!(outcome.is_success());
        assert_eq!(tokens.load().unwrap().unwrap().as_str(), "tok-new");
        assert!(store.session().is_authenticated());
    }

    #[tokio::test]
    async fn register_failure_uses_generic_fallback() {
        let api = Arc::new(FakeAuthApi::default());
        *api.register_response.lock().unwrap() =
            Some(Err(ApiError::Server("boom".into())));
        let store = SessionStore::new(api, Arc::new(MemoryTokenStore::new()));

        let outcome = store
            .register(&Registration {
                email: Email::new("bob@example.com").unwrap(),
                password: "hunter22".into(),
                full_name: None,
            })
            .await;

        assert_eq!(
            outcome,
            AuthOutcome::Failed {
                error: "Registration failed".into()
            }
        );
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let api = Arc::new(FakeAuthApi::default());
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("tok-1")));
        let store = SessionStore::new(api, tokens.clone());

        store.logout();
        let first = store.session();
        store.logout();
        let second = store.session();

        assert!(first.token().is_none() && first.user().is_none());
        assert!(second.token().is_none() && second.user().is_none());
        assert!(tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn unauthorized_event_clears_everything_and_latches_redirect() {
        let api = Arc::new(FakeAuthApi::default());
        *api.login_response.lock().unwrap() = Some(Ok(LoginResponse {
            access_token: AuthToken::new("tok-1"),
            user: Some(user()),
        }));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api, tokens.clone());
        store.login(&credentials()).await;
        assert!(!store.login_required());

        store.unauthorized();

        assert!(tokens.load().unwrap().is_none());
        assert!(!store.session().is_authenticated());
        assert!(store.login_required());
    }

    #[tokio::test]
    async fn successful_login_resets_login_required() {
        let api = Arc::new(FakeAuthApi::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(api.clone(), tokens);
        store.unauthorized();
        assert!(store.login_required());

        *api.login_response.lock().unwrap() = Some(Ok(LoginResponse {
            access_token: AuthToken::new("tok-2"),
            user: Some(user()),
        }));
        store.login(&credentials()).await;

        assert!(!store.login_required());
    }

    #[test]
    fn view_gate_rules() {
        let mut session = Session::starting();
        assert_eq!(ViewGate::for_session(&session), ViewGate::Pending);

        session.finish_loading();
        assert_eq!(ViewGate::for_session(&session), ViewGate::RedirectToSignIn);

        session.authenticate(AuthToken::new("tok"), user());
        assert_eq!(ViewGate::for_session(&session), ViewGate::Render);
    }
}
