//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IAuthApi`] - Authentication endpoints (login, register, user resolution)
//! - [`IContractsApi`] - Owner-facing contract operations (bearer-authenticated)
//! - [`ISharingApi`] - Anonymous shared-link operations (never authenticated)
//! - [`ITokenStore`] - The single persisted bearer token
//! - [`IAuthEvents`] - Process-wide reaction to authentication rejection

pub mod api_error;
pub mod auth_api;
pub mod auth_events;
pub mod contracts_api;
pub mod sharing_api;
pub mod token_store;

pub use api_error::ApiError;
pub use auth_api::{Credentials, IAuthApi, LoginResponse, RegisterResponse, Registration};
pub use auth_events::IAuthEvents;
pub use contracts_api::{ContractUpload, IContractsApi, UnreadCount};
pub use sharing_api::ISharingApi;
pub use token_store::{ITokenStore, MemoryTokenStore};
