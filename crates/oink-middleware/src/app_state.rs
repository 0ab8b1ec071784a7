//! Shared application state for the demo server.
//!
//! Default sink construction lives here, not in the orchestrator: the config
//! picks the sink, and the orchestrator only receives it.

use std::sync::Arc;

use oink_core::error::Result;
use oink_core::{memory, InstanceRegistry, LogSink, Oink, TracingSink};

use crate::config::{OinkConfig, SinkKind};
use crate::sink::FileSink;

#[derive(Clone)]
pub struct AppState {
    oink: Oink,
    registry: Arc<InstanceRegistry>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: OinkConfig) -> Result<Self> {
        let sink = build_sink(&cfg)?;
        let registry = Arc::new(InstanceRegistry::new());
        let instruments = cfg.oink.instrument_set();

        let oink = Oink::builder(sink)
            .instruments(instruments)
            .memory(Arc::from(memory::detect(cfg.oink.memory_source)))
            .counter(registry.clone())
            .build();

        tracing::info!(instruments = ?oink.instruments(), sink = ?cfg.oink.sink, "oink configured");

        Ok(Self { oink, registry })
    }

    pub fn oink(&self) -> Oink {
        self.oink.clone()
    }

    pub fn registry(&self) -> Arc<InstanceRegistry> {
        Arc::clone(&self.registry)
    }
}

/// Sink selected by `oink.sink`.
pub fn build_sink(cfg: &OinkConfig) -> Result<Arc<dyn LogSink>> {
    let sink: Arc<dyn LogSink> = match cfg.oink.sink {
        SinkKind::File => Arc::new(FileSink::open(&cfg.oink.log_path)?),
        SinkKind::Tracing => Arc::new(TracingSink),
    };
    Ok(sink)
}
