//! Cookie reconciliation across the origin boundary.
//!
//! The proxy is served over plain HTTP, and a browser drops any cookie
//! flagged `Secure` that arrives over an insecure transport. Cookies copied
//! from an upstream response therefore lose that attribute.
//!
//! In the other direction, a request to an origin carries that origin's jar
//! cookies; browser cookies only fill in names the jar does not hold.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};

/// How `Set-Cookie` entries are copied onto the client response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCookiePolicy {
    /// Copy verbatim.
    Forward,
    /// Copy with the `Secure` attribute removed.
    StripSecure,
}

/// Remove every `Secure` attribute from a `Set-Cookie` value.
///
/// Matching is per attribute and case-insensitive, so a cookie named
/// `secure` or an attribute like `SecureLevel=1` is left alone.
pub fn strip_secure(set_cookie: &str) -> String {
    let mut parts = set_cookie.split(';');
    let mut out = parts.next().unwrap_or_default().to_string();
    for attr in parts {
        if attr.trim().eq_ignore_ascii_case("secure") {
            continue;
        }
        out.push(';');
        out.push_str(attr);
    }
    out
}

/// Append each upstream `Set-Cookie` to `outbound` as its own entry.
///
/// Returns how many entries were written; zero input is a no-op.
pub fn reconcile_set_cookies<'a, I>(upstream: I, outbound: &mut HeaderMap, policy: SetCookiePolicy) -> usize
where
    I: IntoIterator<Item = &'a HeaderValue>,
{
    let mut written = 0;
    for value in upstream {
        let value = match (policy, value.to_str()) {
            (SetCookiePolicy::StripSecure, Ok(text)) => {
                HeaderValue::from_str(&strip_secure(text)).unwrap_or_else(|_| value.clone())
            }
            _ => value.clone(),
        };
        outbound.append(SET_COOKIE, value);
        written += 1;
    }
    written
}

/// Combine the jar's `Cookie` value with the browser's, jar entries first.
///
/// A browser cookie whose name the jar already holds is dropped, so the
/// origin always sees its own session.
pub fn merge_cookie_header(jar: Option<&str>, browser: Option<&str>) -> Option<String> {
    let jar_pairs: Vec<&str> = cookie_pairs(jar).collect();
    let jar_names: Vec<&str> = jar_pairs.iter().map(|pair| cookie_name(pair)).collect();

    let merged: Vec<&str> = jar_pairs
        .iter()
        .copied()
        .chain(cookie_pairs(browser).filter(|pair| !jar_names.contains(&cookie_name(pair))))
        .collect();

    if merged.is_empty() {
        None
    } else {
        Some(merged.join("; "))
    }
}

fn cookie_pairs(header: Option<&str>) -> impl Iterator<Item = &str> {
    header
        .into_iter()
        .flat_map(|h| h.split(';'))
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
}

fn cookie_name(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(name, _)| name).trim()
}
