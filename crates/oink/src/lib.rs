//! Top-level facade crate for oink.
//!
//! Re-exports the core pipeline and the axum middleware so users can depend on a single crate.

pub mod core {
    pub use oink_core::*;
}

pub mod middleware {
    pub use oink_middleware::*;
}
