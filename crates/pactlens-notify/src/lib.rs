//! Auto-expiring user notification queue
//!
//! A time-ordered collection of transient notices. Each pushed entry gets
//! one deferred removal task instead of callers juggling their own
//! timers; explicit dismissal of an already-expired entry is a no-op.
//! The center is constructed once and passed where needed; there is no
//! global instance.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Default time a notification stays visible
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// One transient notice
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique handle for dismissal
    pub id: Uuid,
    /// User-facing text
    pub message: String,
    /// Severity
    pub kind: NotificationKind,
    /// When the deferred removal fires
    pub expires_at: DateTime<Utc>,
}

/// Time-ordered queue of active notifications with automatic expiry
#[derive(Clone)]
pub struct NotificationCenter {
    entries: Arc<Mutex<Vec<Notification>>>,
    lifetime: Duration,
}

impl NotificationCenter {
    /// Creates a center with the default 5 second lifetime
    pub fn new() -> Self {
        Self::with_lifetime(DEFAULT_LIFETIME)
    }

    /// Creates a center with an explicit lifetime
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            lifetime,
        }
    }

    /// Pushes a notification and schedules its removal.
    ///
    /// Must be called from within a tokio runtime; the removal task is
    /// spawned immediately.
    pub fn push(&self, message: impl Into<String>, kind: NotificationKind) -> Uuid {
        let id = Uuid::new_v4();
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            expires_at: Utc::now()
                + chrono::Duration::from_std(self.lifetime)
                    .unwrap_or_else(|_| chrono::Duration::seconds(5)),
        };
        debug!(%id, ?kind, "Notification pushed");
        self.entries
            .lock()
            .expect("notification lock poisoned")
            .push(notification);

        let entries = Arc::clone(&self.entries);
        let lifetime = self.lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            entries
                .lock()
                .expect("notification lock poisoned")
                .retain(|n| n.id != id);
        });
        id
    }

    /// Shorthand for a success notice
    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(message, NotificationKind::Success)
    }

    /// Shorthand for an error notice
    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(message, NotificationKind::Error)
    }

    /// Shorthand for a warning notice
    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.push(message, NotificationKind::Warning)
    }

    /// Shorthand for an informational notice
    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(message, NotificationKind::Info)
    }

    /// Removes a notification by id; unknown or already-expired ids are
    /// ignored
    pub fn dismiss(&self, id: Uuid) {
        self.entries
            .lock()
            .expect("notification lock poisoned")
            .retain(|n| n.id != id);
    }

    /// Snapshot of the currently visible notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .expect("notification lock poisoned")
            .clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
