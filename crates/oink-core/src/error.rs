//! Shared error types across oink crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, OinkError>;

/// Unified error type used by core and middleware.
#[derive(Debug, Error)]
pub enum OinkError {
    #[error("memory measurement unavailable: {0}")]
    Memory(String),
    #[error("instance counter failed: {0}")]
    Counter(String),
    #[error("log sink failed: {0}")]
    Sink(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

/// Outcome of a wrapped request that did not produce a result.
///
/// `Handler` carries the downstream failure untouched; no report lines were
/// written for that request. `Instrument` means the handler succeeded but a
/// report step failed, aborting the remaining steps.
#[derive(Debug, Error)]
pub enum HandleError<E> {
    #[error("handler failed: {0}")]
    Handler(E),
    #[error("instrumentation failed: {0}")]
    Instrument(#[source] OinkError),
}

impl<E> HandleError<E> {
    /// Returns the handler error, if that is what failed.
    pub fn into_handler(self) -> Option<E> {
        match self {
            HandleError::Handler(e) => Some(e),
            HandleError::Instrument(_) => None,
        }
    }
}
