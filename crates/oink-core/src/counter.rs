//! Instantiation counting: the data-mapping layer's hook, made injectable.
//!
//! `InstanceRegistry` is the in-process implementation. Counters are shared by
//! every request using the same registry; under concurrent requests the counts
//! observed by one report may include another request's allocations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::{OinkError, Result};

/// Counts observed since the last reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceSnapshot {
    /// Per-label counts in first-seen order.
    pub counts: Vec<(String, u64)>,
    pub total: u64,
}

impl InstanceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.counts.is_empty()
    }
}

/// Hook exposed by a data-mapping layer that tracks instantiations.
pub trait InstanceCounter: Send + Sync {
    /// One-time activation of counting. Must be idempotent.
    fn enable(&self);

    /// Counts since the last reset. Does not mutate the counters.
    fn snapshot(&self) -> Result<InstanceSnapshot>;

    /// Zero all counters for the next request.
    fn reset(&self) -> Result<()>;

    /// Snapshot, then reset. Implementations that can do both atomically
    /// should, so no instantiation falls between the two.
    fn take(&self) -> Result<InstanceSnapshot> {
        let snapshot = self.snapshot()?;
        self.reset()?;
        Ok(snapshot)
    }
}

/// Process-local instantiation counter.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    enabled: AtomicBool,
    state: Mutex<InstanceSnapshot>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Record one instantiation of `label`.
    pub fn record(&self, label: &str) {
        self.record_n(label, 1);
    }

    /// Record `n` instantiations of `label`. No-op until enabled.
    pub fn record_n(&self, label: &str, n: u64) {
        if !self.is_enabled() || n == 0 {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            tracing::warn!(label, "instance registry poisoned; instantiation dropped");
            return;
        };
        match state.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count = count.saturating_add(n),
            None => state.counts.push((label.to_string(), n)),
        }
        state.total = state.total.saturating_add(n);
    }
}

impl InstanceCounter for InstanceRegistry {
    fn enable(&self) {
        if !self.enabled.swap(true, Ordering::AcqRel) {
            tracing::debug!("instance counting enabled");
        }
    }

    fn snapshot(&self) -> Result<InstanceSnapshot> {
        let state = self
            .state
            .lock()
            .map_err(|_| OinkError::Counter("registry lock poisoned".into()))?;
        Ok(state.clone())
    }

    fn reset(&self) -> Result<()> {
        self.take().map(|_| ())
    }

    fn take(&self) -> Result<InstanceSnapshot> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| OinkError::Counter("registry lock poisoned".into()))?;
        Ok(std::mem::take(&mut *state))
    }
}
