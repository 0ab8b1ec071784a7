//! Process memory measurement.
//!
//! Values are resident set size in kilobytes, the unit oink reports have
//! always carried. Only Linux `/proc` is supported; elsewhere every source
//! returns `OinkError::Memory`.

use serde::Deserialize;

use crate::error::{OinkError, Result};

/// Source of the current process memory usage.
pub trait MemorySource: Send + Sync {
    fn current_kb(&self) -> Result<u64>;
}

/// Which `/proc` file to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// `VmRSS` from `/proc/self/status`.
    #[default]
    Status,
    /// Sum of `Rss:` lines from `/proc/self/smaps`.
    Smaps,
}

/// Build the memory source for `kind`.
pub fn detect(kind: MemoryKind) -> Box<dyn MemorySource> {
    match kind {
        MemoryKind::Status => Box::new(ProcStatusMemory),
        MemoryKind::Smaps => Box::new(SmapsMemory),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcStatusMemory;

impl MemorySource for ProcStatusMemory {
    fn current_kb(&self) -> Result<u64> {
        let status = read_proc("/proc/self/status")?;
        parse_status_rss(&status)
            .ok_or_else(|| OinkError::Memory("VmRSS missing from /proc/self/status".into()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SmapsMemory;

impl MemorySource for SmapsMemory {
    fn current_kb(&self) -> Result<u64> {
        let smaps = read_proc("/proc/self/smaps")?;
        Ok(parse_smaps_rss(&smaps))
    }
}

#[cfg(target_os = "linux")]
fn read_proc(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| OinkError::Memory(format!("read {path}: {e}")))
}

#[cfg(not(target_os = "linux"))]
fn read_proc(_path: &str) -> Result<String> {
    Err(OinkError::Memory("unsupported platform".into()))
}

/// Extract `VmRSS` (kB) from the contents of `/proc/<pid>/status`.
pub fn parse_status_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse().ok())
}

/// Sum every `Rss:` entry (kB) in the contents of `/proc/<pid>/smaps`.
pub fn parse_smaps_rss(smaps: &str) -> u64 {
    smaps
        .lines()
        .filter(|line| line.starts_with("Rss:"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|value| value.parse::<u64>().ok())
        .sum()
}
