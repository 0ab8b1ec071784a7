//! Oink core: per-request instrumentation pipeline, independent of any HTTP stack.
//!
//! This crate owns the ordered report written after each request (routing
//! line, memory line, instantiation breakdown, completion marker), the
//! formatting of those lines, and the selection of active instruments. The
//! collaborators it consumes (log sink, memory source, instance counter) are
//! traits so hosts can inject their own or use the implementations shipped here.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A failed
//! measurement surfaces as `OinkError` and never takes the host process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod format;
pub mod instrument;
pub mod memory;
pub mod orchestrator;
pub mod routing;
pub mod sink;

/// Shared result type.
pub use error::{HandleError, OinkError, Result};
pub use counter::{InstanceCounter, InstanceRegistry, InstanceSnapshot};
pub use instrument::{Instrument, InstrumentSet};
pub use memory::{MemoryKind, MemorySource};
pub use orchestrator::{Oink, OinkBuilder};
pub use routing::{RequestMeta, RouteParams, RoutingSource};
pub use sink::{LogSink, MemorySink, TracingSink};
