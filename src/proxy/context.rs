//! Everything a handler needs, built once at startup.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::config::{MergeConfig, ProxyConfig};
use crate::proxy::anchor::{AnchorMatcher, MarkerAnchor, RegexAnchor};
use crate::proxy::cookies::SetCookiePolicy;
use crate::proxy::error::SetupError;
use crate::session::SessionStore;
use crate::upstream::{Origin, OriginKind, UpstreamClient};

/// Shared, immutable handler context.
#[derive(Debug)]
pub struct ProxyContext {
    pub dev: UpstreamClient,
    pub live: UpstreamClient,
    pub sessions: SessionStore,
    pub anchor: Arc<dyn AnchorMatcher>,
    /// Path of the app shell on the dev origin.
    pub dev_app_path: String,
    /// `Referer` sent on live passthrough requests.
    pub live_referer: HeaderValue,
    /// Cookie handling for live passthrough responses.
    pub passthrough_cookies: SetCookiePolicy,
}

impl ProxyContext {
    /// Build origins, seed the session jars and create both clients.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, SetupError> {
        let dev_origin = Origin::from_config(OriginKind::Dev, &config.origins.dev)?;
        let live_origin = Origin::from_config(OriginKind::Live, &config.origins.live)?;

        let sessions = SessionStore::seed(
            &dev_origin,
            &live_origin,
            &config.cookies.session_cookie_name,
        );

        let referer_url = live_origin.url_for(&config.merge.live_referer_path)?;
        let live_referer = HeaderValue::from_str(referer_url.as_str())
            .map_err(|_| SetupError::Referer(referer_url.to_string()))?;

        let anchor = anchor_from_config(&config.merge)?;

        let dev = UpstreamClient::new(dev_origin, sessions.dev().clone(), &config.upstream)?;
        let live = UpstreamClient::new(live_origin, sessions.live().clone(), &config.upstream)?;

        let passthrough_cookies = if config.cookies.strip_secure_on_passthrough {
            SetCookiePolicy::StripSecure
        } else {
            SetCookiePolicy::Forward
        };

        Ok(Self {
            dev,
            live,
            sessions,
            anchor,
            dev_app_path: config.merge.dev_app_path.clone(),
            live_referer,
            passthrough_cookies,
        })
    }
}

/// Marker pair when configured, otherwise the regex pattern.
fn anchor_from_config(config: &MergeConfig) -> Result<Arc<dyn AnchorMatcher>, SetupError> {
    let anchor: Arc<dyn AnchorMatcher> = match &config.anchor_markers {
        Some(markers) => Arc::new(MarkerAnchor::new(&markers.start, &markers.end)),
        None => Arc::new(RegexAnchor::new(&config.anchor_pattern)?),
    };
    Ok(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnchorMarkers;

    fn config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.origins.dev.session_id = "dev-id".into();
        config.origins.live.session_id = "live-id".into();
        config
    }

    #[tokio::test]
    async fn builds_from_defaults() {
        let context = ProxyContext::from_config(&config()).unwrap();

        assert_eq!(context.live_referer, "https://logentries.com/app/");
        assert_eq!(context.dev_app_path, "/app");
        assert_eq!(context.passthrough_cookies, SetCookiePolicy::StripSecure);
        assert_eq!(context.sessions.dev().get("sessionid").as_deref(), Some("dev-id"));
        assert_eq!(context.sessions.live().get("sessionid").as_deref(), Some("live-id"));
        assert!(Arc::ptr_eq(context.dev.jar(), context.sessions.dev()));
        assert!(Arc::ptr_eq(context.live.jar(), context.sessions.live()));
    }

    #[tokio::test]
    async fn literal_passthrough_cookies_on_request() {
        let mut config = config();
        config.cookies.strip_secure_on_passthrough = false;
        let context = ProxyContext::from_config(&config).unwrap();
        assert_eq!(context.passthrough_cookies, SetCookiePolicy::Forward);
    }

    #[test]
    fn bad_anchor_is_setup_error() {
        let mut config = config();
        config.merge.anchor_pattern = "(".into();
        assert!(matches!(
            ProxyContext::from_config(&config),
            Err(SetupError::Anchor(_))
        ));
    }

    #[tokio::test]
    async fn markers_replace_the_pattern() {
        let mut config = config();
        config.merge.anchor_pattern = "(".into();
        config.merge.anchor_markers = Some(AnchorMarkers {
            start: "<!-- live -->".into(),
            end: "<!-- /live -->".into(),
        });
        let context = ProxyContext::from_config(&config).unwrap();

        let doc = "a<!-- live -->b<!-- /live -->c";
        assert_eq!(&doc[context.anchor.find(doc).unwrap()], "<!-- live -->b<!-- /live -->");
    }
}
