//! Minimal `Set-Cookie` parsing.
//!
//! Only the attributes the jars act on are interpreted (`Path`, `Max-Age`,
//! `Expires`); everything else is ignored.

use chrono::{DateTime, NaiveDateTime, Utc};

/// A cookie as received in a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// Seconds until expiry; `Some(n)` with `n <= 0` means delete.
    pub max_age: Option<i64>,
    /// Absolute expiry. Ignored when `max_age` is present.
    pub expires: Option<DateTime<Utc>>,
}

impl ParsedCookie {
    /// Parse a `Set-Cookie` header value. Returns `None` when there is no
    /// `name=value` pair or the name is empty.
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Self {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            path: "/".to_string(),
            max_age: None,
            expires: None,
        };

        for attr in parts {
            let (key, val) = match attr.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attr.trim(), ""),
            };
            if key.eq_ignore_ascii_case("path") && val.starts_with('/') {
                cookie.path = val.to_string();
            } else if key.eq_ignore_ascii_case("max-age") {
                cookie.max_age = val.parse().ok();
            } else if key.eq_ignore_ascii_case("expires") {
                cookie.expires = parse_expires(val);
            }
        }

        Some(cookie)
    }

    /// True when this cookie instructs the jar to drop the entry.
    pub fn is_removal(&self) -> bool {
        self.is_removal_at(Utc::now())
    }

    /// Removal check against an explicit clock.
    pub fn is_removal_at(&self, now: DateTime<Utc>) -> bool {
        match (self.max_age, self.expires) {
            (Some(age), _) => age <= 0,
            (None, Some(expires)) => expires <= now,
            (None, None) => false,
        }
    }
}

/// `Expires` in RFC 1123 form, or the older dashed form some servers send.
fn parse_expires(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%a, %d-%b-%Y %H:%M:%S GMT")
        .ok()
        .map(|naive| naive.and_utc())
}

/// RFC 6265 path-match.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if cookie_path == request_path {
        return true;
    }
    if !request_path.starts_with(cookie_path) {
        return false;
    }
    cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/')
}
