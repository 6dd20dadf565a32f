//! Proxy error types and response handling.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::response::{stamp_error, stamp_status, OutcomeStatus};
use crate::upstream::UpstreamError;

/// Failure while serving a single request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response<Body> {
        let (status, message) = match &self {
            ProxyError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.describe()),
        };

        tracing::error!(status = %status, error = %message, "Proxy error");

        let mut response = Response::new(Body::from(message.clone()));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        stamp_status(headers, OutcomeStatus::Error);
        stamp_error(headers, &message);
        response
    }
}

/// Failure while assembling the proxy at startup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("invalid merge anchor pattern: {0}")]
    Anchor(#[from] regex::Error),

    #[error("invalid referer {0:?}")]
    Referer(String),
}
