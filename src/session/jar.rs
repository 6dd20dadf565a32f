//! Per-origin cookie jar.
//!
//! # Responsibilities
//! - Hold the cookies of exactly one origin
//! - Accept `Set-Cookie` only from that origin
//! - Build the `Cookie` header for requests to that origin
//!
//! # Design Decisions
//! - Backed by `DashMap` so concurrent requests can read and write safely
//! - Last write wins; entries are coarse (usually a single session cookie)
//! - Plugged into reqwest through `CookieStore`, so every response the
//!   origin's client receives updates the jar without handler involvement

use dashmap::DashMap;
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use url::Url;

use crate::session::cookie::{path_matches, ParsedCookie};

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    path: String,
}

/// Cookie jar bound to a single origin address.
#[derive(Debug)]
pub struct SessionJar {
    origin: url::Origin,
    cookies: DashMap<String, StoredCookie>,
}

impl SessionJar {
    /// Create an empty jar bound to the origin of `base_url`.
    pub fn new(base_url: &Url) -> Self {
        Self {
            origin: base_url.origin(),
            cookies: DashMap::new(),
        }
    }

    /// Insert a cookie directly, bypassing the origin check.
    pub fn seed(&self, name: &str, value: &str) {
        self.cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                path: "/".to_string(),
            },
        );
    }

    /// Current value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|c| c.value.clone())
    }

    /// Sorted cookie names, mostly useful in tests and logs.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cookies.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// True when `url` belongs to this jar's origin.
    pub fn accepts(&self, url: &Url) -> bool {
        url.origin() == self.origin
    }

    /// Apply one `Set-Cookie` header value received from `url`.
    ///
    /// Returns false when the cookie was rejected (foreign origin or
    /// unparseable header).
    pub fn store(&self, set_cookie: &str, url: &Url) -> bool {
        if !self.accepts(url) {
            tracing::debug!(
                url = %url,
                origin = %self.origin.ascii_serialization(),
                "Ignoring Set-Cookie from foreign origin"
            );
            return false;
        }

        let Some(cookie) = ParsedCookie::parse(set_cookie) else {
            tracing::debug!(header = %set_cookie, "Ignoring malformed Set-Cookie");
            return false;
        };

        if cookie.is_removal() {
            self.cookies.remove(&cookie.name);
        } else {
            self.cookies.insert(
                cookie.name,
                StoredCookie {
                    value: cookie.value,
                    path: cookie.path,
                },
            );
        }
        true
    }

    /// `Cookie` header value for a request to `url`, if any cookie applies.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        if !self.accepts(url) {
            return None;
        }

        let mut pairs: Vec<(String, String)> = self
            .cookies
            .iter()
            .filter(|entry| path_matches(&entry.value().path, url.path()))
            .map(|entry| (entry.key().clone(), entry.value().value.clone()))
            .collect();

        if pairs.is_empty() {
            return None;
        }

        pairs.sort();
        Some(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        for header in cookie_headers {
            if let Ok(value) = header.to_str() {
                self.store(value, url);
            }
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.cookie_header(url)
            .and_then(|header| HeaderValue::from_str(&header).ok())
    }
}
