//! Application use cases
//!
//! Orchestration over the port traits. Every use case takes its
//! collaborators as `Arc<dyn Port>` constructor arguments; there are no
//! process-global singletons, so tests wire in doubles and production
//! wires in the HTTP adapters.

pub mod change_password;
pub mod session;
pub mod shared_view;

pub use change_password::{
    ChangePasswordError, ChangePasswordUseCase, PasswordChange, CHANGE_FAILED_MESSAGE,
    MIN_PASSWORD_LEN,
};
pub use session::{AuthOutcome, SessionStore, ViewGate};
pub use shared_view::{
    FeedbackError, SharedViewResolver, SharedViewState, FEEDBACK_FAILED_MESSAGE,
    LINK_EXPIRED_MESSAGE,
};
