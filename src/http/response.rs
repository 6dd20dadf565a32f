//! Response handling and transformation.
//!
//! # Responsibilities
//! - Stamp the outcome headers (`X-Lep-Status`, `X-Lep-Error`)
//! - Transform a streaming upstream response for the client
//! - Strip hop-by-hop headers on the way back
//!
//! # Design Decisions
//! - Streaming responses never buffer the body; chunks are relayed in order
//! - Dropping the client response drops the upstream body, closing its socket
//! - Every response carries `X-Lep-Status`, so behavior is visible in devtools

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;

use crate::http::request::strip_hop_by_hop;
use crate::proxy::cookies::{reconcile_set_cookies, SetCookiePolicy};

/// Which origin(s) produced a response.
pub const X_LEP_STATUS: HeaderName = HeaderName::from_static("x-lep-status");

/// Human-readable reason for a degraded or failed response.
pub const X_LEP_ERROR: HeaderName = HeaderName::from_static("x-lep-error");

/// Outcome reported in `X-Lep-Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    Dev,
    Live,
    Mixed,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Dev => "Dev",
            OutcomeStatus::Live => "Live",
            OutcomeStatus::Mixed => "Mixed",
            OutcomeStatus::Error => "Error",
        }
    }

    /// Read the outcome back from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        match headers.get(&X_LEP_STATUS)?.to_str().ok()? {
            "Dev" => Some(OutcomeStatus::Dev),
            "Live" => Some(OutcomeStatus::Live),
            "Mixed" => Some(OutcomeStatus::Mixed),
            "Error" => Some(OutcomeStatus::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set `X-Lep-Status`.
pub fn stamp_status(headers: &mut HeaderMap, status: OutcomeStatus) {
    headers.insert(X_LEP_STATUS, HeaderValue::from_static(status.as_str()));
}

/// Set `X-Lep-Error`. Characters a header cannot carry become `?`.
pub fn stamp_error(headers: &mut HeaderMap, detail: &str) {
    headers.insert(X_LEP_ERROR, header_safe(detail));
}

fn header_safe(text: &str) -> HeaderValue {
    let cleaned: String = text
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect();
    HeaderValue::from_str(&cleaned).unwrap_or_else(|_| HeaderValue::from_static("unprintable error"))
}

/// Relay a streaming upstream response to the client.
///
/// Status and end-to-end headers are preserved, `Set-Cookie` entries go
/// through `cookies`, and the body is streamed chunk by chunk.
pub fn relay(upstream: reqwest::Response, outcome: OutcomeStatus, cookies: SetCookiePolicy) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let set_cookies: Vec<HeaderValue> = headers
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .cloned()
        .collect();
    headers.remove(axum::http::header::SET_COOKIE);
    reconcile_set_cookies(set_cookies.iter(), &mut headers, cookies);

    stamp_status(&mut headers, outcome);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
