//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// The two upstream origins.
    pub origins: OriginsConfig,

    /// Path classification rules.
    pub routing: RoutingConfig,

    /// App page merge settings.
    pub merge: MergeConfig,

    /// Cookie handling.
    pub cookies: CookieConfig,

    /// Upstream HTTP client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind on.
    pub host: String,

    /// TCP port. Zero picks an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5050,
        }
    }
}

/// Both upstream origins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginsConfig {
    /// Origin serving static assets and the app shell.
    pub dev: OriginConfig,

    /// Origin serving authenticated data.
    pub live: OriginConfig,
}

impl Default for OriginsConfig {
    fn default() -> Self {
        Self {
            dev: OriginConfig::new("https://dev.logentries.net"),
            live: OriginConfig::new("https://logentries.com"),
        }
    }
}

/// A single upstream origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OriginConfig {
    /// Scheme + authority, e.g. "https://logentries.com".
    pub base_url: String,

    /// Session identifier seeded into this origin's cookie jar.
    #[serde(default)]
    pub session_id: String,
}

impl OriginConfig {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            session_id: String::new(),
        }
    }
}

/// Route classification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Paths starting with this prefix are served by the merge handler.
    pub app_prefix: String,

    /// File extensions (without the dot) fetched from the dev origin.
    pub asset_extensions: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_prefix: "/app".to_string(),
            asset_extensions: ["js", "less", "css", "html", "jpg", "jpeg", "png", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// App page merge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Regex locating the region spliced from the live page into the dev shell.
    pub anchor_pattern: String,

    /// Path of the app shell on the dev origin.
    pub dev_app_path: String,

    /// Path on the live origin used as `Referer` for passthrough requests.
    pub live_referer_path: String,

    /// Literal start/end markers. When set they are used instead of
    /// `anchor_pattern`.
    pub anchor_markers: Option<AnchorMarkers>,
}

/// Region delimited by two literal markers, both included in the region.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnchorMarkers {
    pub start: String,
    pub end: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            anchor_pattern: r"// Logentries namespace[\w\W]*?Default screen".to_string(),
            dev_app_path: "/app".to_string(),
            live_referer_path: "/app/".to_string(),
            anchor_markers: None,
        }
    }
}

/// Cookie handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Name of the session cookie seeded into both jars.
    pub session_cookie_name: String,

    /// Strip `Secure` from `Set-Cookie` on live passthrough responses too,
    /// not only on merged app pages.
    pub strip_secure_on_passthrough: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sessionid".to_string(),
            strip_secure_on_passthrough: true,
        }
    }
}

/// Upstream HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Skip certificate validation (dev hosts use self-signed certs).
    pub accept_invalid_certs: bool,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total timeout for buffered (merge) requests in seconds.
    pub request_timeout_secs: u64,

    /// Follow upstream redirects.
    pub follow_redirects: bool,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            follow_redirects: true,
            use_system_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_origins() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.port, 5050);
        assert_eq!(config.origins.dev.base_url, "https://dev.logentries.net");
        assert_eq!(config.origins.live.base_url, "https://logentries.com");
        assert_eq!(config.routing.app_prefix, "/app");
        assert_eq!(config.routing.asset_extensions.len(), 8);
        assert!(config.upstream.accept_invalid_certs);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            port = 6060

            [origins.live]
            base_url = "http://localhost:5000"
            session_id = "abc"

            [observability]
            log_format = "json"

            [merge.anchor_markers]
            start = "<!-- live -->"
            end = "<!-- /live -->"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 6060);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.origins.live.base_url, "http://localhost:5000");
        assert_eq!(config.origins.live.session_id, "abc");
        assert_eq!(config.origins.dev.base_url, "https://dev.logentries.net");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.merge.dev_app_path, "/app");
        assert_eq!(config.merge.anchor_markers.unwrap().end, "<!-- /live -->");
    }
}
