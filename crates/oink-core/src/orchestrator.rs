//! Per-request report orchestration.
//!
//! `Oink` wraps a downstream handler: it runs the handler once, then writes
//! the report in a fixed order:
//! 1. routing line (always)
//! 2. memory line (`memory` instrument)
//! 3. instantiation breakdown, counters reset as they are read (`instance_tracking` instrument)
//! 4. completion marker (always)
//!
//! The handler result is returned untouched. A handler failure skips the
//! report entirely; a failing step aborts the steps after it.

use std::future::Future;
use std::sync::Arc;

use crate::counter::{InstanceCounter, InstanceRegistry};
use crate::error::{HandleError, Result};
use crate::format;
use crate::instrument::{Instrument, InstrumentSet};
use crate::memory::{self, MemoryKind, MemorySource};
use crate::routing::{self, RoutingSource};
use crate::sink::LogSink;

/// Instrumentation orchestrator. Immutable after construction.
#[derive(Clone)]
pub struct Oink {
    sink: Arc<dyn LogSink>,
    instruments: InstrumentSet,
    memory: Arc<dyn MemorySource>,
    counter: Arc<dyn InstanceCounter>,
    pid: u32,
}

impl std::fmt::Debug for Oink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oink")
            .field("instruments", &self.instruments)
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl Oink {
    /// Start building an orchestrator that writes to `sink`.
    pub fn builder(sink: Arc<dyn LogSink>) -> OinkBuilder {
        OinkBuilder {
            sink,
            instruments: None,
            memory: None,
            counter: None,
            pid: None,
        }
    }

    pub fn instruments(&self) -> &InstrumentSet {
        &self.instruments
    }

    /// Run `handler` against `request`, then report on the completed request.
    pub fn handle<Req, R, E, F>(
        &self,
        request: &mut Req,
        handler: F,
    ) -> std::result::Result<R, HandleError<E>>
    where
        Req: RoutingSource + ?Sized,
        F: FnOnce(&mut Req) -> std::result::Result<R, E>,
    {
        let response = handler(&mut *request).map_err(HandleError::Handler)?;
        self.report(&*request).map_err(HandleError::Instrument)?;
        Ok(response)
    }

    /// Async counterpart of [`Oink::handle`].
    ///
    /// `handler` is the downstream call, not yet polled; it runs when awaited
    /// here and is the only suspension point. `request` is read after it resolves.
    pub async fn handle_async<Req, R, E, Fut>(
        &self,
        request: &Req,
        handler: Fut,
    ) -> std::result::Result<R, HandleError<E>>
    where
        Req: RoutingSource + ?Sized,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let response = handler.await.map_err(HandleError::Handler)?;
        self.report(request).map_err(HandleError::Instrument)?;
        Ok(response)
    }

    /// Write the report for a request that has already completed.
    pub fn report<Req: RoutingSource + ?Sized>(&self, request: &Req) -> Result<()> {
        self.log_routing(request)?;
        self.log_memory()?;
        self.log_instances()?;
        self.log_completed()
    }

    fn log_routing<Req: RoutingSource + ?Sized>(&self, request: &Req) -> Result<()> {
        self.sink.info(&format::action_line(&routing::describe(request)))
    }

    fn log_memory(&self) -> Result<()> {
        if !self.instruments.contains(&Instrument::Memory) {
            return Ok(());
        }
        let kb = self.memory.current_kb()?;
        self.sink.info(&format::memory_line(kb, self.pid))
    }

    fn log_instances(&self) -> Result<()> {
        if !self.instruments.contains(&Instrument::InstanceTracking) {
            return Ok(());
        }
        let snapshot = self.counter.take()?;
        self.sink
            .info(&format::breakdown_line(snapshot.total, &snapshot.counts))
    }

    fn log_completed(&self) -> Result<()> {
        self.sink.info(format::COMPLETE_MARKER)
    }
}

/// Builder for [`Oink`]. Unset collaborators fall back to the in-crate defaults.
pub struct OinkBuilder {
    sink: Arc<dyn LogSink>,
    instruments: Option<InstrumentSet>,
    memory: Option<Arc<dyn MemorySource>>,
    counter: Option<Arc<dyn InstanceCounter>>,
    pid: Option<u32>,
}

impl OinkBuilder {
    /// Explicit instrument selection. Unset means every known instrument.
    pub fn instruments(mut self, instruments: InstrumentSet) -> Self {
        self.instruments = Some(instruments);
        self
    }

    pub fn memory(mut self, memory: Arc<dyn MemorySource>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn counter(mut self, counter: Arc<dyn InstanceCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Override the PID written on memory lines.
    pub fn pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn build(self) -> Oink {
        let instruments = self.instruments.unwrap_or_default();
        let counter: Arc<dyn InstanceCounter> = match self.counter {
            Some(counter) => counter,
            None => Arc::new(InstanceRegistry::new()),
        };
        if instruments.contains(&Instrument::InstanceTracking) {
            counter.enable();
        }
        let memory: Arc<dyn MemorySource> = match self.memory {
            Some(memory) => memory,
            None => Arc::from(memory::detect(MemoryKind::default())),
        };

        Oink {
            sink: self.sink,
            instruments,
            memory,
            counter,
            pid: self.pid.unwrap_or_else(std::process::id),
        }
    }
}
