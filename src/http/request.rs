//! Request handling and transformation.
//!
//! # Responsibilities
//! - Extract routing-relevant information (path, path + query)
//! - Prepare a copy of the inbound headers for forwarding upstream
//!
//! # Design Decisions
//! - The inbound request is never mutated; forwarding works on a clone
//! - `Host` is always dropped so reqwest derives it from the origin URL
//! - Hop-by-hop headers (and any named in `Connection`) never cross the proxy

use axum::http::{header, HeaderMap, HeaderValue, Uri};

/// Headers that only apply to a single transport hop.
pub const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// `path?query` of the inbound URI, `/` when absent.
pub fn path_and_query(uri: &Uri) -> &str {
    match uri.path_and_query().map(|pq| pq.as_str()) {
        Some(pq) if !pq.is_empty() => pq,
        _ => "/",
    }
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    for name in listed {
        headers.remove(name.as_str());
    }
}

/// Copy of `inbound` suitable for any upstream: no `Host`, no hop-by-hop.
pub fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    strip_hop_by_hop(&mut headers);
    headers
}

/// Copy of `inbound` for the live origin.
///
/// The browser's cookies belong to the proxy's address, not to live, so
/// they are dropped and the live jar authenticates instead. `Referer` is
/// pinned to the live app page.
pub fn live_headers(inbound: &HeaderMap, referer: &HeaderValue) -> HeaderMap {
    let mut headers = forwardable_headers(inbound);
    headers.remove(header::COOKIE);
    headers.insert(header::REFERER, referer.clone());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:5050"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid=browser"));
        headers.insert(header::REFERER, HeaderValue::from_static("http://localhost:5050/app"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-debug"));
        headers.insert("x-debug", HeaderValue::from_static("1"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("5"));
        headers
    }

    #[test]
    fn forwardable_drops_host_and_hop_by_hop() {
        let headers = forwardable_headers(&inbound());
        assert!(headers.get(header::HOST).is_none());
        assert!(headers.get(header::CONNECTION).is_none());
        assert!(headers.get("x-debug").is_none());
        assert_eq!(headers.get(header::COOKIE).unwrap(), "sessionid=browser");
        assert_eq!(headers.get(header::CONTENT_LENGTH).unwrap(), "5");
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "text/html");
    }

    #[test]
    fn live_headers_replace_cookie_and_referer() {
        let original = inbound();
        let referer = HeaderValue::from_static("https://logentries.com/app/");
        let headers = live_headers(&original, &referer);

        assert!(headers.get(header::COOKIE).is_none());
        assert!(headers.get(header::HOST).is_none());
        assert_eq!(headers.get(header::REFERER).unwrap(), "https://logentries.com/app/");

        // The inbound map is untouched.
        assert_eq!(original.get(header::COOKIE).unwrap(), "sessionid=browser");
        assert_eq!(original.get(header::HOST).unwrap(), "localhost:5050");
    }

    #[test]
    fn path_and_query_defaults_to_root() {
        let uri: Uri = "/app/logs?q=1".parse().unwrap();
        assert_eq!(path_and_query(&uri), "/app/logs?q=1");

        let uri: Uri = "http://example.com".parse().unwrap();
        assert_eq!(path_and_query(&uri), "/");
    }
}
