//! oink middleware library entry.
//!
//! This crate plugs the oink core into axum: the request middleware, the
//! file sink, strict YAML config, and the demo server wiring. It is consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod layer;
pub mod ops;
pub mod router;
pub mod sink;

pub use layer::oink_middleware;
pub use sink::FileSink;
