//! Interaction logging — an append-only record of inbound queries, uploads
//! and handler failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Entries kept in memory; older ones are dropped first. Sinks see everything.
const MAX_RETAINED: usize = 1_000;

/// A single interaction log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: InteractionKind,
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// A chat message as received
    Query,
    /// An upload attempt, accepted or not
    Upload,
    /// A handler fell back to its apology
    HandlerError,
}

impl InteractionKind {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionKind::Query => "query",
            InteractionKind::Upload => "upload",
            InteractionKind::HandlerError => "handler_error",
        }
    }
}

/// Where interaction entries are written.
pub trait InteractionSink: Send + Sync {
    fn record(&self, entry: &InteractionEntry);
}

/// Keeps the most recent entries in memory and forwards each one to its sinks.
pub struct InteractionLog {
    entries: Mutex<VecDeque<InteractionEntry>>,
    sinks: Vec<Box<dyn InteractionSink>>,
}

impl std::fmt::Debug for InteractionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionLog")
            .field("entry_count", &self.count())
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionLog {
    /// A log with no sinks; entries are only retained in memory.
    pub fn new() -> Self {
        Self::with_sinks(Vec::new())
    }

    pub fn with_sinks(sinks: Vec<Box<dyn InteractionSink>>) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            sinks,
        }
    }

    pub fn log(&self, kind: InteractionKind, user_id: &str, message: &str) {
        let entry = InteractionEntry {
            timestamp: Utc::now(),
            kind,
            user_id: user_id.into(),
            message: message.into(),
        };

        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if entries.len() == MAX_RETAINED {
                entries.pop_front();
            }
            entries.push_back(entry.clone());
        }

        for sink in &self.sinks {
            sink.record(&entry);
        }
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> Vec<InteractionEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn entries_by_kind(&self, kind: InteractionKind) -> Vec<InteractionEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Emits each entry as a structured `tracing::info!` event.
pub struct TracingSink;

impl InteractionSink for TracingSink {
    fn record(&self, entry: &InteractionEntry) {
        tracing::info!(
            kind = entry.kind.label(),
            user_id = %entry.user_id,
            message = %entry.message,
            "INTERACTION"
        );
    }
}

/// Appends one line per entry to a text file:
/// `YYYY-MM-DD HH:MM:SS - <kind> <user>: <message>`.
///
/// Lines are handed to a background writer thread, so recording never
/// touches the disk on the caller's thread. Dropping the sink flushes
/// whatever is still queued.
pub struct FileSink {
    path: PathBuf,
    writer: NonBlocking,
    _guard: WorkerGuard,
}

impl FileSink {
    /// Open (or create) the log file in append mode. Missing parent
    /// directories are created.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name.to_string_lossy())
            .build(dir)
            .map_err(io::Error::other)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        Ok(Self {
            path,
            writer,
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(entry: &InteractionEntry) -> String {
        // One entry per line, even for multi-line messages.
        let message = entry.message.replace('\r', "\\r").replace('\n', "\\n");
        format!(
            "{} - {} {}: {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind.label(),
            entry.user_id,
            message
        )
    }
}

impl InteractionSink for FileSink {
    fn record(&self, entry: &InteractionEntry) {
        let line = Self::format_line(entry);
        let mut writer = self.writer.clone();
        if let Err(e) = writer.write_all(line.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to queue interaction log line");
        }
    }
}
