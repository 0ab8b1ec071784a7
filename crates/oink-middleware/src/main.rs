//! oink demo server.
//!
//! Serves a couple of routes wrapped by the oink middleware and writes a
//! report per request to the configured sink.
//! Config path: `OINK_CONFIG` (default `oink.yaml`); a missing file means defaults.

use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

use oink_middleware::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("OINK_CONFIG").unwrap_or_else(|_| "oink.yaml".into());
    let cfg = if Path::new(&path).exists() {
        config::load_from_file(&path).expect("config load failed")
    } else {
        tracing::warn!(%path, "config file not found; using defaults");
        config::OinkConfig::default()
    };
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "oink demo server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
