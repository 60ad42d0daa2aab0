//! Append-only notification journal.
//!
//! Records every notification to a JSONL file so a terminal session leaves a
//! trail of submitted transaction hashes and failures.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::notify::{Notification, Notifier};

/// Errors from the journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Append-only JSONL journal of notifications.
pub struct NotificationJournal {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl NotificationJournal {
    /// Create or open a journal file for appending. Parent directories are
    /// created as needed.
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append one entry. Flushes after each write.
    pub fn append(&self, notification: &Notification) -> Result<(), JournalError> {
        let line = serde_json::to_string(notification)?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }

    /// Read every entry back, oldest first.
    pub fn read_all(path: &Path) -> Result<Vec<Notification>, JournalError> {
        let contents = std::fs::read_to_string(path)?;
        contents
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(JournalError::from))
            .collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for NotificationJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationJournal")
            .field("path", &self.path)
            .finish()
    }
}

impl Notifier for NotificationJournal {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.append(&notification) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to journal notification");
        }
    }
}
