//! File-backed log sink in Hodel 3000 compliant syslog format.
//!
//! Each line reads `Mon DD HH:MM:SS <hostname> rails[<pid>]: <message>`, which is
//! what oink report parsers split on to group lines by process.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use oink_core::error::{OinkError, Result};
use oink_core::LogSink;

/// Default report file, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "log/oink.log";

const TIME_FORMAT: &str = "%b %d %H:%M:%S";

/// Appends one formatted line per call. Lines are written under a mutex with a
/// single `write_all`, so concurrent requests never tear a line.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    hostname: String,
    pid: u32,
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                OinkError::Sink(format!("create log dir {} failed: {e}", dir.display()))
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| OinkError::Sink(format!("open {} failed: {e}", path.display())))?;

        Ok(Self {
            path,
            hostname: hostname(),
            pid: std::process::id(),
            file: Mutex::new(file),
        })
    }

}

impl LogSink for FileSink {
    fn info(&self, line: &str) -> Result<()> {
        let formatted = hodel_line(Local::now(), &self.hostname, self.pid, line);
        let mut file = self
            .file
            .lock()
            .map_err(|_| OinkError::Sink("log file lock poisoned".into()))?;
        file.write_all(formatted.as_bytes())
            .map_err(|e| OinkError::Sink(format!("write {} failed: {e}", self.path.display())))
    }
}

/// Render one newline-terminated line. Newlines inside `message` are dropped
/// so one call never spans more than one line.
pub fn hodel_line(at: DateTime<Local>, hostname: &str, pid: u32, message: &str) -> String {
    let message = message.replace(['\n', '\r'], "");
    format!("{} {hostname} rails[{pid}]: {message}\n", at.format(TIME_FORMAT))
}

fn hostname() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok())
        .unwrap_or_else(|| "localhost".to_string())
}
