//! Routing descriptor resolution.
//!
//! The descriptor names the endpoint that served a request. It is resolved by
//! an ordered fallback, first match wins:
//! 1. structured routing params (newer key first, then the older key) as `controller#action`
//! 2. the raw request path
//! 3. `Unknown`

/// Literal used when no routing metadata is present.
pub const UNKNOWN_ROUTE: &str = "Unknown";

/// Resolved controller/action pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub controller: String,
    pub action: String,
}

impl RouteParams {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

/// Request metadata the orchestrator reads after the handler returns.
///
/// Every accessor defaults to `None`, so hosts only implement what they carry.
pub trait RoutingSource {
    /// Structured routing params under the current key name.
    fn dispatch_params(&self) -> Option<&RouteParams> {
        None
    }

    /// Structured routing params under the historical key name.
    fn legacy_params(&self) -> Option<&RouteParams> {
        None
    }

    /// Raw request path.
    fn path(&self) -> Option<&str> {
        None
    }
}

/// Plain metadata bag, the default `RoutingSource`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub dispatch_params: Option<RouteParams>,
    pub legacy_params: Option<RouteParams>,
    pub path: Option<String>,
}

impl RequestMeta {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

impl RoutingSource for RequestMeta {
    fn dispatch_params(&self) -> Option<&RouteParams> {
        self.dispatch_params.as_ref()
    }

    fn legacy_params(&self) -> Option<&RouteParams> {
        self.legacy_params.as_ref()
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Resolve the routing descriptor for a completed request.
pub fn describe<R: RoutingSource + ?Sized>(source: &R) -> String {
    if let Some(params) = source.dispatch_params().or_else(|| source.legacy_params()) {
        return format!("{}#{}", params.controller, params.action);
    }
    match source.path() {
        Some(path) => path.to_string(),
        None => UNKNOWN_ROUTE.to_string(),
    }
}
