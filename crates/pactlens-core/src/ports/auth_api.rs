//! Authentication API port (driven/secondary port)
//!
//! Interface for the backend's authentication endpoints. The login and
//! registration calls are themselves unauthenticated; user resolution and
//! password update carry the bearer token (attached by the adapter from
//! the token store).
//!
//! ## Design Notes
//!
//! - Returns [`ApiError`](super::ApiError) rather than `anyhow::Result`
//!   because the session store reacts to the classification (unauthorized
//!   vs. backend message vs. transport).
//! - The login response may omit the user object; the session store then
//!   issues a follow-up `current_user` call.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthToken, Email, User};

use super::ApiError;

/// Credentials submitted to `POST /auth/login/email`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account email
    pub email: Email,
    /// Plain-text password (sent over TLS, never stored)
    pub password: String,
}

/// Payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Account email
    pub email: Email,
    /// Plain-text password
    pub password: String,
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Response from `POST /auth/login/email`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub access_token: AuthToken,
    /// User object, when the backend includes it in the login response
    #[serde(default)]
    pub user: Option<User>,
}

/// Response from `POST /auth/register`; always includes both token and user
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Bearer token for the new account
    pub access_token: AuthToken,
    /// The newly created user
    pub user: User,
}

/// Port trait for authentication endpoints
#[async_trait::async_trait]
pub trait IAuthApi: Send + Sync {
    /// Exchanges credentials for a token via `POST /auth/login/email`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Creates an account via `POST /auth/register`
    async fn register(&self, registration: &Registration) -> Result<RegisterResponse, ApiError>;

    /// Resolves the current identity via `GET /users/me` (bearer)
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Requests a password-reset email via `POST /auth/password-reset-request`
    async fn request_password_reset(&self, email: &Email) -> Result<(), ApiError>;

    /// Confirms a password reset via `POST /auth/password-reset-confirm`
    async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;

    /// Changes the password via `POST /auth/password-update` (bearer)
    async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;
}
