//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check origin addresses and session identifiers
//! - Validate value ranges (timeouts > 0, paths absolute)
//! - Compile the merge anchor pattern once to catch typos at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{OriginConfig, ProxyConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `origins.dev.base_url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_origin("origins.dev", &config.origins.dev, &mut errors);
    validate_origin("origins.live", &config.origins.live, &mut errors);

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    if !config.routing.app_prefix.starts_with('/') {
        errors.push(ValidationError::new("routing.app_prefix", "must start with '/'"));
    }

    if config.routing.asset_extensions.is_empty() {
        errors.push(ValidationError::new(
            "routing.asset_extensions",
            "at least one extension is required",
        ));
    }
    for ext in &config.routing.asset_extensions {
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(ValidationError::new(
                "routing.asset_extensions",
                format!("invalid extension {:?} (alphanumeric, no leading dot)", ext),
            ));
        }
    }

    match &config.merge.anchor_markers {
        Some(markers) => {
            if markers.start.is_empty() || markers.end.is_empty() {
                errors.push(ValidationError::new(
                    "merge.anchor_markers",
                    "start and end must not be empty",
                ));
            }
        }
        None => {
            if let Err(e) = regex::Regex::new(&config.merge.anchor_pattern) {
                errors.push(ValidationError::new("merge.anchor_pattern", e.to_string()));
            }
        }
    }
    for (field, path) in [
        ("merge.dev_app_path", &config.merge.dev_app_path),
        ("merge.live_referer_path", &config.merge.live_referer_path),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
        }
    }

    if !is_cookie_token(&config.cookies.session_cookie_name) {
        errors.push(ValidationError::new(
            "cookies.session_cookie_name",
            "must be a non-empty cookie token",
        ));
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be > 0"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_secs", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address like 127.0.0.1:9090",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_origin(prefix: &str, origin: &OriginConfig, errors: &mut Vec<ValidationError>) {
    match Url::parse(&origin.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::new(
                    format!("{prefix}.base_url"),
                    format!("unsupported scheme {:?}", url.scheme()),
                ));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::new(format!("{prefix}.base_url"), "missing host"));
            }
        }
        Err(e) => {
            errors.push(ValidationError::new(format!("{prefix}.base_url"), e.to_string()));
        }
    }

    if origin.session_id.is_empty() {
        errors.push(ValidationError::new(format!("{prefix}.session_id"), "is required"));
    } else if !is_cookie_value(&origin.session_id) {
        errors.push(ValidationError::new(
            format!("{prefix}.session_id"),
            "contains characters not allowed in a cookie value",
        ));
    }
}

fn is_cookie_value(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}

fn is_cookie_token(name: &str) -> bool {
    !name.is_empty() && is_cookie_value(name) && !name.contains('=')
}
