//! User-facing notifications.
//!
//! The adapter reports outcomes (transaction submitted, transaction failed,
//! wallet missing) as short toasts with a title and a description. Delivery
//! is fire-and-forget: a [`Notifier`] cannot refuse or acknowledge one.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Create a notification stamped with the current time.
    pub fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn info(&self, title: &str, description: &str) {
        self.notify(Notification::new(Level::Info, title, description));
    }

    fn error(&self, title: &str, description: &str) {
        self.notify(Notification::new(Level::Error, title, description));
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            Level::Info => tracing::info!(title = %n.title, "{}", n.description),
            Level::Error => tracing::error!(title = %n.title, "{}", n.description),
        }
    }
}

/// Keeps every notification in memory until drained.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Remove and return everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn count(&self, level: Level) -> usize {
        self.lock().iter().filter(|n| n.level == level).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
