//! App page merge: the dev shell with the live page's anchored region.
//!
//! # Flow
//! ```text
//! GET dev  <dev_app_path>      ┐
//!                               ├─ join ─→ anchor in live? ─no→ live body, Live
//! GET live <inbound path?query> ┘                │yes
//!                                      anchor in dev? ─no→ dev body, Dev
//!                                                │yes
//!                          splice live region into dev, copy live cookies, Mixed
//! ```
//!
//! Either request failing outright yields a single `Error` response once
//! both have settled.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::request::path_and_query;
use crate::http::response::{stamp_error, stamp_status, OutcomeStatus};
use crate::observability::metrics;
use crate::proxy::anchor::AnchorMatcher;
use crate::proxy::context::ProxyContext;
use crate::proxy::cookies::{reconcile_set_cookies, SetCookiePolicy};
use crate::proxy::error::ProxyError;
use crate::upstream::BufferedResponse;

pub const LIVE_ANCHOR_MISSING: &str = "Not found live app page";
pub const DEV_ANCHOR_MISSING: &str = "Not found dev app page";

/// Result of merging two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Dev document with its region replaced by the live region.
    Merged(String),
    /// The live document has no anchored region.
    LiveAnchorMissing,
    /// The live document matched but the dev document did not.
    DevAnchorMissing,
}

/// Replace the first anchored region of `dev` with the anchored region of
/// `live`, byte for byte.
pub fn merge_documents(anchor: &dyn AnchorMatcher, dev: &str, live: &str) -> MergeOutcome {
    let Some(live_region) = anchor.find(live) else {
        return MergeOutcome::LiveAnchorMissing;
    };
    let Some(dev_region) = anchor.find(dev) else {
        return MergeOutcome::DevAnchorMissing;
    };

    let replacement = &live[live_region];
    let mut merged = String::with_capacity(dev.len() - dev_region.len() + replacement.len());
    merged.push_str(&dev[..dev_region.start]);
    merged.push_str(replacement);
    merged.push_str(&dev[dev_region.end..]);
    MergeOutcome::Merged(merged)
}

/// Serve an app page by merging the dev shell with the live page.
pub async fn merge_app_page(ctx: &ProxyContext, request: Request<Body>) -> Response {
    let live_path = path_and_query(request.uri()).to_string();

    let (dev, live) = tokio::join!(ctx.dev.fetch(&ctx.dev_app_path), ctx.live.fetch(&live_path));

    let (dev, live) = match (dev, live) {
        (Ok(dev), Ok(live)) => (dev, live),
        (Err(err), other) => {
            if let Err(live_err) = other {
                tracing::warn!(error = %live_err.describe(), "Live app page also failed");
            }
            metrics::record_merge(OutcomeStatus::Error);
            return ProxyError::from(err).into_response();
        }
        (Ok(_), Err(err)) => {
            metrics::record_merge(OutcomeStatus::Error);
            return ProxyError::from(err).into_response();
        }
    };

    match merge_documents(ctx.anchor.as_ref(), &dev.body, &live.body) {
        MergeOutcome::LiveAnchorMissing => {
            tracing::warn!(path = %live_path, live_status = %live.status, "Live app page has no anchor");
            metrics::record_merge(OutcomeStatus::Live);
            page_response(&live, live.body.clone(), OutcomeStatus::Live, Some(LIVE_ANCHOR_MISSING))
        }
        MergeOutcome::DevAnchorMissing => {
            tracing::warn!(path = %ctx.dev_app_path, dev_status = %dev.status, "Dev app page has no anchor");
            metrics::record_merge(OutcomeStatus::Dev);
            page_response(&dev, dev.body.clone(), OutcomeStatus::Dev, Some(DEV_ANCHOR_MISSING))
        }
        MergeOutcome::Merged(body) => {
            tracing::debug!(path = %live_path, bytes = body.len(), "App page merged");
            metrics::record_merge(OutcomeStatus::Mixed);
            let mut response = page_response(&dev, body, OutcomeStatus::Mixed, None);
            reconcile_set_cookies(live.set_cookies(), response.headers_mut(), SetCookiePolicy::StripSecure);
            response
        }
    }
}

/// 200 response carrying `body`, typed like the upstream it came from.
fn page_response(
    source: &BufferedResponse,
    body: String,
    outcome: OutcomeStatus,
    error: Option<&str>,
) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;

    let headers: &mut HeaderMap = response.headers_mut();
    let content_type = source
        .headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert(header::CONTENT_TYPE, content_type);
    stamp_status(headers, outcome);
    if let Some(detail) = error {
        stamp_error(headers, detail);
    }
    response
}
