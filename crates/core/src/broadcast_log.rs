use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const LOG_FILE_NAME: &str = "broadcasts.log";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub sender: String,
    pub message: String,
    pub servers: Vec<String>,
}

impl LogEntry {
    pub fn new(sender: impl Into<String>, message: impl Into<String>, servers: &[String]) -> Self {
        LogEntry {
            timestamp: Local::now(),
            sender: sender.into(),
            message: message.into(),
            servers: servers.to_vec(),
        }
    }

    /// `<message> (Servers: a, b)`
    pub fn describe(&self) -> String {
        format!("{} (Servers: {})", self.message, self.servers.join(", "))
    }

    /// Fills `%date%`, `%player%` and `%message%` in `template`.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("%date%", &self.timestamp.format(DATE_FORMAT).to_string())
            .replace("%player%", &self.sender)
            .replace("%message%", &self.describe())
    }
}

/// Append-only broadcast history.
///
/// Each entry is written as one line with a single `write_all` while holding
/// the lock, so lines from concurrent broadcasts never interleave.
#[derive(Debug)]
pub struct BroadcastLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl BroadcastLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BroadcastLog {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn in_directory(data_directory: &Path) -> Self {
        Self::new(data_directory.join(LOG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &LogEntry, template: &str) -> io::Result<()> {
        let mut line = entry.render(template);
        line.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
