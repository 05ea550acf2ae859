//! HTTP adapters for the PactLens backend API
//!
//! Implements the `pactlens-core` port traits over reqwest:
//!
//! - [`client::ApiClient`]: authenticated plumbing shared by the auth and
//!   contract adapters (bearer attachment, response classification,
//!   unauthorized-event dispatch)
//! - [`auth::AuthApi`] / [`contracts::ContractsApi`]: typed endpoint
//!   wrappers over the shared client
//! - [`sharing::SharingClient`]: a separate client for share-token
//!   endpoints that structurally cannot attach a bearer header
//! - [`token_store::KeyringTokenStore`]: bearer-token persistence in the
//!   OS credential store

pub mod auth;
pub mod client;
pub mod contracts;
pub mod sharing;
pub mod token_store;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use contracts::{share_token_from_url, ContractsApi};
pub use sharing::SharingClient;
pub use token_store::KeyringTokenStore;
