//! Authentication-rejection port
//!
//! A process-wide response-interception rule, not a per-call concern:
//! whenever any authenticated API call receives an unauthorized response,
//! the adapter invokes this port so a stale or revoked token can never
//! keep the application in a "looks logged in but every call fails" state.

/// Port trait for reacting to an authentication rejection.
///
/// The session store implements this by clearing the persisted token and
/// the in-memory session and latching a "login required" signal; adapters
/// call it on every 401 regardless of which operation triggered it.
pub trait IAuthEvents: Send + Sync {
    /// Called when any API response comes back unauthorized
    fn unauthorized(&self);
}
