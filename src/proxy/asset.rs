//! Static assets, streamed from the dev origin.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::response::{IntoResponse, Response};

use crate::http::request::{forwardable_headers, path_and_query};
use crate::http::response::{relay, OutcomeStatus};
use crate::proxy::body::relay_inbound;
use crate::proxy::context::ProxyContext;
use crate::proxy::cookies::{merge_cookie_header, SetCookiePolicy};
use crate::proxy::error::ProxyError;

/// Forward the request to dev and stream the answer back.
///
/// The dev jar's cookies are sent, with any other browser cookies added
/// after them. Response cookies pass through untouched.
pub async fn proxy_asset(ctx: &ProxyContext, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let path = path_and_query(&parts.uri);

    let jar_cookies = match ctx.dev.jar_cookies(path) {
        Ok(cookies) => cookies,
        Err(e) => return ProxyError::from(e).into_response(),
    };

    let mut headers = forwardable_headers(&parts.headers);
    let browser_cookies = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    headers.remove(header::COOKIE);
    if let Some(cookie) = merge_cookie_header(jar_cookies.as_deref(), browser_cookies.as_deref())
        .and_then(|merged| HeaderValue::from_str(&merged).ok())
    {
        headers.insert(header::COOKIE, cookie);
    }

    let body = relay_inbound(body);

    match ctx.dev.send(parts.method, path, headers, body).await {
        Ok(upstream) => relay(upstream, OutcomeStatus::Dev, SetCookiePolicy::Forward),
        Err(e) => ProxyError::from(e).into_response(),
    }
}
