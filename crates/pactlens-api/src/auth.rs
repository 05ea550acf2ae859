//! Authentication endpoint adapter
//!
//! Implements [`IAuthApi`] over the shared [`ApiClient`]. Login and
//! registration are sent without a bearer header (no token exists yet);
//! the remaining calls pick up whatever token the store currently holds.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use pactlens_core::{
    domain::{Email, User},
    ports::{ApiError, Credentials, IAuthApi, LoginResponse, RegisterResponse, Registration},
};

use crate::client::ApiClient;

#[derive(Serialize)]
struct PasswordResetRequest<'a> {
    email: &'a Email,
}

#[derive(Serialize)]
struct PasswordResetConfirm<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct PasswordUpdate<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// [`IAuthApi`] implementation over the backend auth endpoints
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IAuthApi for AuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        debug!(email = %credentials.email, "Exchanging credentials for token");
        self.client.post_json("/auth/login/email", credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<RegisterResponse, ApiError> {
        debug!(email = %registration.email, "Registering account");
        self.client.post_json("/auth/register", registration).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get_json("/users/me").await
    }

    async fn request_password_reset(&self, email: &Email) -> Result<(), ApiError> {
        self.client
            .post_json_unit("/auth/password-reset-request", &PasswordResetRequest { email })
            .await
    }

    async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.client
            .post_json_unit(
                "/auth/password-reset-confirm",
                &PasswordResetConfirm {
                    token: reset_token,
                    new_password,
                },
            )
            .await
    }

    async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.client
            .post_json_unit(
                "/auth/password-update",
                &PasswordUpdate {
                    current_password,
                    new_password,
                },
            )
            .await
    }
}
