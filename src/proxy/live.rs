//! Live passthrough: everything that is neither the app page nor an asset.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::http::request::{live_headers, path_and_query};
use crate::http::response::{relay, OutcomeStatus};
use crate::proxy::body::relay_inbound;
use crate::proxy::context::ProxyContext;
use crate::proxy::error::ProxyError;

/// Stream the request to live, authenticated by the live jar, and stream
/// the response back.
///
/// The browser's `Host` and `Cookie` are dropped from a copy of the inbound
/// headers and `Referer` points at the live app page. The request body is
/// relayed while it is still arriving.
pub async fn proxy_live(ctx: &ProxyContext, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let headers = live_headers(&parts.headers, &ctx.live_referer);
    let body = relay_inbound(body);

    match ctx
        .live
        .send(parts.method, path_and_query(&parts.uri), headers, body)
        .await
    {
        Ok(upstream) => relay(upstream, OutcomeStatus::Live, ctx.passthrough_cookies),
        Err(e) => ProxyError::from(e).into_response(),
    }
}
