//! Terminal rendering of notifications.

use wenwallet_core::journal::NotificationJournal;
use wenwallet_core::notify::{Level, Notification, Notifier};

/// Prints notifications to stderr as toasts and journals them when a
/// journal is configured.
#[derive(Debug)]
pub struct TerminalNotifier {
    journal: Option<NotificationJournal>,
}

impl TerminalNotifier {
    pub fn new(journal: Option<NotificationJournal>) -> Self {
        Self { journal }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let icon = match notification.level {
            Level::Info => "ℹ️ ",
            Level::Error => "❌",
        };
        eprintln!("{icon} {}", notification.title);
        if !notification.description.is_empty() {
            eprintln!("   {}", notification.description);
        }
        if let Some(journal) = &self.journal {
            journal.notify(notification);
        }
    }
}
