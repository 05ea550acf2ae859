//! Domain entities and business logic
//!
//! This module contains the core domain types for PactLens:
//! - Newtypes for type-safe identifiers and validated domain values
//! - Contract, analysis and comment types as the backend serves them
//! - Session state for the authenticated identity
//! - Domain-specific error types

pub mod contract;
pub mod errors;
pub mod newtypes;
pub mod session;

// Re-export commonly used types
pub use contract::{
    AnalysisSummary, Comment, Contract, ContractProjection, ContractStatus, FeedbackDraft,
    RiskFactor, RiskLevel, ShareLink, SharedContractView,
};
pub use errors::DomainError;
pub use newtypes::{AuthToken, ContractId, Email, Rating, ShareToken};
pub use session::{Session, User};
