//! End-to-end: axum router wrapped by the oink middleware.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::{self, Next},
    routing::get,
    Extension, Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use oink_core::{
    InstanceRegistry, InstrumentSet, MemorySink, MemorySource, Oink, OinkError, RouteParams,
};
use oink_middleware::{app_state::AppState, config, oink_middleware, router};

struct FixedMemory(u64);

impl MemorySource for FixedMemory {
    fn current_kb(&self) -> oink_core::Result<u64> {
        Ok(self.0)
    }
}

struct BrokenMemory;

impl MemorySource for BrokenMemory {
    fn current_kb(&self) -> oink_core::Result<u64> {
        Err(OinkError::Memory("gone".into()))
    }
}

fn app(oink: Oink, registry: Arc<InstanceRegistry>) -> Router {
    let reg = registry.clone();
    Router::new()
        .route(
            "/users/:id",
            get(move || {
                let reg = reg.clone();
                async move {
                    reg.record_n("User", 2);
                    reg.record("Comment");
                    (
                        StatusCode::CREATED,
                        [(header::CONTENT_TYPE, "text/x-oink")],
                        Extension(RouteParams::new("users", "show")),
                        "payload",
                    )
                }
            }),
        )
        .route("/plain", get(|| async { "plain" }))
        .layer(middleware::from_fn_with_state(oink, oink_middleware))
}

async fn tag_legacy(mut req: Request, next: Next) -> axum::response::Response {
    req.extensions_mut()
        .insert(RouteParams::new("legacy", "index"));
    next.run(req).await
}

fn get_req(uri: &str) -> Request {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn response_passes_through_and_report_is_ordered() {
    let sink = Arc::new(MemorySink::new());
    let registry = Arc::new(InstanceRegistry::new());
    let oink = Oink::builder(sink.clone())
        .memory(Arc::new(FixedMemory(5120)))
        .counter(registry.clone())
        .pid(9)
        .build();

    let res = app(oink, registry).oneshot(get_req("/users/5")).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/x-oink");
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"payload");

    assert_eq!(
        sink.lines(),
        vec![
            "Oink Action: users#show",
            "Memory usage: 5120 | PID: 9",
            "Instantiation Breakdown: Total: 3 | User: 2 | Comment: 1",
            "Oink Log Entry Complete",
        ]
    );
}

#[tokio::test]
async fn falls_back_to_path_then_legacy_params() {
    let sink = Arc::new(MemorySink::new());
    let oink = Oink::builder(sink.clone())
        .instruments(InstrumentSet::none())
        .build();
    let registry = Arc::new(InstanceRegistry::new());

    let plain = app(oink.clone(), registry.clone());
    plain.oneshot(get_req("/plain")).await.unwrap();

    let tagged = app(oink, registry).layer(middleware::from_fn(tag_legacy));
    tagged.clone().oneshot(get_req("/plain")).await.unwrap();
    // the handler's own params win over the outer layer's
    tagged.oneshot(get_req("/users/1")).await.unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "Oink Action: /plain",
            "Oink Log Entry Complete",
            "Oink Action: legacy#index",
            "Oink Log Entry Complete",
            "Oink Action: users#show",
            "Oink Log Entry Complete",
        ]
    );
}

#[tokio::test]
async fn failed_report_still_returns_response() {
    let sink = Arc::new(MemorySink::new());
    let oink = Oink::builder(sink.clone())
        .memory(Arc::new(BrokenMemory))
        .build();

    let res = app(oink, Arc::new(InstanceRegistry::new()))
        .oneshot(get_req("/plain"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"plain");
    assert_eq!(sink.lines(), vec!["Oink Action: /plain"]);
}

#[tokio::test]
async fn demo_router_writes_file_report() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log").join("oink.log");
    let yaml = format!(
        "version: 1\noink:\n  log_path: {:?}\n  instruments: [instance_tracking]\n",
        log_path.display().to_string()
    );
    let cfg = config::load_from_str(&yaml).unwrap();
    let state = AppState::new(cfg).unwrap();
    let app = router::build_router(state);

    let res = app.clone().oneshot(get_req("/users/6")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.oneshot(get_req("/healthz")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let messages: Vec<&str> = contents
        .lines()
        .map(|l| l.split_once("]: ").unwrap().1)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Oink Action: users#show",
            "Instantiation Breakdown: Total: 3 | Post: 2 | User: 1",
            "Oink Log Entry Complete",
            "Oink Action: /healthz",
            "Instantiation Breakdown: Total: 0",
            "Oink Log Entry Complete",
        ]
    );
}

#[tokio::test]
async fn route_names_cannot_forge_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oink.log");
    let sink = Arc::new(oink_middleware::FileSink::open(&path).unwrap());
    let oink = Oink::builder(sink).instruments(InstrumentSet::none()).build();

    let app = Router::new()
        .route(
            "/forged",
            get(|| async {
                (
                    Extension(RouteParams::new(
                        "users\nrails[1]: Oink Log Entry Complete",
                        "show",
                    )),
                    "ok",
                )
            }),
        )
        .layer(middleware::from_fn_with_state(oink, oink_middleware));
    app.oneshot(get_req("/forged")).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("]: Oink Log Entry Complete"));
}
