//! Log sinks: where report lines go.

use std::sync::Mutex;

use crate::error::{OinkError, Result};

/// Destination for report lines.
///
/// Each call appends exactly one whole line. Implementations shared across
/// concurrent requests must not tear or interleave a single line.
pub trait LogSink: Send + Sync {
    fn info(&self, line: &str) -> Result<()>;
}

/// Emits each line as one `tracing` event under target `oink`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, line: &str) -> Result<()> {
        tracing::info!(target: "oink", "{line}");
        Ok(())
    }
}

/// Buffers lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn info(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|_| OinkError::Sink("memory sink poisoned".into()))?
            .push(line.to_string());
        Ok(())
    }
}
