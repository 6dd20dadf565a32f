//! Shared utilities for integration tests: mock origins and a running proxy.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use lep_proxy::config::ProxyConfig;
use lep_proxy::session::SessionStore;
use lep_proxy::{HttpServer, Shutdown};

/// A request as seen by a mock origin.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A mock upstream origin listening on an ephemeral port.
#[derive(Clone)]
pub struct MockOrigin {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockOrigin {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("origin received no request")
    }
}

/// Start a mock origin whose responses come from `respond`.
pub async fn spawn_origin<F>(respond: F) -> MockOrigin
where
    F: Fn(&Recorded) -> Response + Clone + Send + Sync + 'static,
{
    let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();
    let log = requests.clone();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let log = log.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
            let recorded = Recorded {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            };
            let response = respond(&recorded);
            log.lock().unwrap().push(recorded);
            response
        }
    });

    let addr = spawn_router(app).await;
    MockOrigin { addr, requests }
}

/// Serve `app` on an ephemeral port, for origins that need full control
/// over how they read the request.
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Proxy config pointing at the two mock origins.
pub fn config_for(dev: &str, live: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.origins.dev.base_url = dev.to_string();
    config.origins.dev.session_id = "dev-session".to_string();
    config.origins.live.base_url = live.to_string();
    config.origins.live.session_id = "live-session".to_string();
    config.upstream.use_system_proxy = false;
    config.upstream.connect_timeout_secs = 2;
    config.upstream.request_timeout_secs = 5;
    config
}

/// A proxy running on an ephemeral port.
pub struct RunningProxy {
    pub addr: SocketAddr,
    pub sessions: SessionStore,
    pub shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_proxy(config: ProxyConfig) -> RunningProxy {
    let server = HttpServer::new(config).expect("proxy should build");
    let sessions = server.sessions().clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    RunningProxy {
        addr,
        sessions,
        shutdown,
    }
}

/// Browser stand-in: no env proxies, no redirects, no cookie store.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
