//! HTTP client bound to one origin and its session jar.
//!
//! # Responsibilities
//! - Build absolute upstream URLs from inbound paths
//! - Attach the origin's cookies and record its `Set-Cookie` responses
//! - Buffered mode for the merge handler, streaming mode for passthrough
//!
//! # Design Decisions
//! - One `reqwest::Client` per origin, each with its own cookie provider, so
//!   a response can only ever reach the jar of the origin that sent it
//! - Certificate validation is configurable and disabled by default
//! - Only buffered requests get a total timeout; streams may run long

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::UpstreamConfig;
use crate::session::SessionJar;
use crate::upstream::error::UpstreamError;
use crate::upstream::origin::Origin;

/// A fully materialized upstream response.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Final URL after redirects.
    pub url: Url,
    pub body: String,
}

impl BufferedResponse {
    /// All `Set-Cookie` header values, in order.
    pub fn set_cookies(&self) -> impl Iterator<Item = &HeaderValue> {
        self.headers.get_all(axum::http::header::SET_COOKIE).iter()
    }
}

/// Client for a single upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    origin: Origin,
    jar: Arc<SessionJar>,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl UpstreamClient {
    /// Create a client whose cookie state lives in `jar`.
    pub fn new(
        origin: Origin,
        jar: Arc<SessionJar>,
        config: &UpstreamConfig,
    ) -> Result<Self, UpstreamError> {
        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let http = builder
            .cookie_provider(jar.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(redirect)
            .build()
            .map_err(|source| UpstreamError::Client {
                origin: origin.kind,
                source,
            })?;

        if config.accept_invalid_certs {
            tracing::debug!(origin = %origin.kind, "Certificate validation disabled");
        }

        Ok(Self {
            origin,
            jar,
            http,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn jar(&self) -> &Arc<SessionJar> {
        &self.jar
    }

    /// `Cookie` value the jar holds for `path_and_query` on this origin.
    pub fn jar_cookies(&self, path_and_query: &str) -> Result<Option<String>, UpstreamError> {
        let url = self.origin.url_for(path_and_query)?;
        Ok(self.jar.cookie_header(&url))
    }

    /// GET `path_and_query` and read the whole body as text.
    pub async fn fetch(&self, path_and_query: &str) -> Result<BufferedResponse, UpstreamError> {
        let url = self.origin.url_for(path_and_query)?;

        tracing::debug!(origin = %self.origin.kind, url = %url, "Buffered upstream request");

        let response = self
            .http
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| self.transport(&url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| self.transport(&url, e))?;

        tracing::debug!(
            origin = %self.origin.kind,
            status = %status,
            bytes = body.len(),
            "Buffered upstream response"
        );

        Ok(BufferedResponse {
            status,
            headers,
            url: final_url,
            body,
        })
    }

    /// Send a request whose response body is left unread for streaming.
    pub async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: Option<reqwest::Body>,
    ) -> Result<reqwest::Response, UpstreamError> {
        let url = self.origin.url_for(path_and_query)?;

        tracing::debug!(
            origin = %self.origin.kind,
            method = %method,
            url = %url,
            "Streaming upstream request"
        );

        let mut request = self.http.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(|e| self.transport(&url, e))
    }

    fn transport(&self, url: &Url, source: reqwest::Error) -> UpstreamError {
        UpstreamError::Transport {
            origin: self.origin.kind,
            url: url.to_string(),
            source,
        }
    }
}
