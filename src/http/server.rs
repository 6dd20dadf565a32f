//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all proxy handler
//! - Wire up middleware (request ID, tracing)
//! - Dispatch each request to the handler its route names
//! - Record per-request metrics
//! - Serve until the shutdown signal

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::response::OutcomeStatus;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::proxy::{asset, live, merge, ProxyContext, SetupError};
use crate::routing::{Route, Router as ProxyRouter};
use crate::session::SessionStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub proxy: Arc<ProxyContext>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    sessions: SessionStore,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Seeds both session jars; nothing is bound yet.
    pub fn new(config: ProxyConfig) -> Result<Self, SetupError> {
        let proxy = ProxyContext::from_config(&config)?;
        Ok(Self::with_context(config, proxy))
    }

    /// Create a server around an already built context.
    fn with_context(config: ProxyConfig, proxy: ProxyContext) -> Self {
        let sessions = proxy.sessions.clone();
        let state = AppState {
            router: Arc::new(ProxyRouter::from_config(&config.routing)),
            proxy: Arc::new(proxy),
        };

        let router = Self::build_router(state);
        Self {
            router,
            config,
            sessions,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle to both session jars.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Main proxy handler.
/// Classifies the path and hands the request to that route's handler.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let route = state.router.classify(request.uri().path());

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        route = %route,
        "Proxying request"
    );

    let response = match route {
        Route::AppMerge => merge::merge_app_page(&state.proxy, request).await,
        Route::Asset => asset::proxy_asset(&state.proxy, request).await,
        Route::LivePassthrough => live::proxy_live(&state.proxy, request).await,
    };

    let outcome = OutcomeStatus::from_headers(response.headers());
    let status = response.status();

    tracing::info!(
        request_id = %request_id,
        route = %route,
        status = status.as_u16(),
        outcome = outcome.map(|o| o.as_str()).unwrap_or("none"),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request handled"
    );
    metrics::record_request(route.as_str(), outcome, status.as_u16(), start_time);

    response
}
