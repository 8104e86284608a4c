//! Append-only, human-readable event log persisted under the application data directory.
use std::{
    collections::VecDeque,
    fmt,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{
    log::{info, warn},
    prelude::*,
};
use time::{macros::format_description, OffsetDateTime};

const FALLBACK_TIMESTAMP: &str = "0000-00-00 00:00:00";
/// Oldest lines are dropped past this backlog while the file stays unwritable.
const MAX_PENDING_LINES: usize = 1024;

/// Severity recorded alongside each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Log,
    Warning,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Log => "Log",
            Self::Warning => "Warning",
            Self::Error => "Error",
        };
        write!(f, "{}", label)
    }
}

/// Buffered lines waiting to be appended to the log file.
#[derive(Resource, Debug)]
pub struct EventLog {
    output_path: PathBuf,
    pending: VecDeque<String>,
    dropped: usize,
    failing: bool,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: VecDeque::new(),
            dropped: 0,
            failing: false,
        }
    }

    /// Queues a session banner (`=== title ===`), written without a timestamp.
    pub fn banner(&mut self, title: &str) {
        self.push(format!("=== {} ===", title));
    }

    pub fn record(&mut self, level: EventLevel, message: impl AsRef<str>) {
        let line = format_line(&current_timestamp(), level, message.as_ref());
        self.push(line);
    }

    fn push(&mut self, line: String) {
        if self.pending.len() >= MAX_PENDING_LINES {
            self.pending.pop_front();
            self.dropped += 1;
        }
        self.pending.push_back(line);
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Lines discarded because the backlog was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Appends pending lines; they stay queued if the file cannot be written.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        let mut buffer = String::new();
        for line in &self.pending {
            buffer.push_str(line);
            buffer.push('\n');
        }
        file.write_all(buffer.as_bytes())?;
        file.flush()?;

        self.pending.clear();
        Ok(())
    }
}

/// `[yyyy-MM-dd HH:mm:ss] [Level] message`
pub fn format_line(timestamp: &str, level: EventLevel, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, level, message)
}

fn current_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}

/// Flushes pending log lines, retrying next frame when persistence fails.
///
/// The warning is emitted once per failure streak.
pub fn flush_event_log(mut log: ResMut<EventLog>) {
    if log.pending_len() == 0 {
        return;
    }

    match log.flush() {
        Ok(()) => {
            if log.failing {
                info!("Event log writable again at {:?}", log.path());
            }
            log.failing = false;
        }
        Err(err) => {
            if !log.failing {
                warn!("Failed to append event log to {:?}: {}", log.path(), err);
            }
            log.failing = true;
        }
    }
}
