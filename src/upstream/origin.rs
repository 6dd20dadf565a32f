//! Upstream origin identity.

use url::Url;

use crate::config::OriginConfig;
use crate::upstream::error::UpstreamError;

/// Which of the two upstreams an origin is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginKind {
    Dev,
    Live,
}

impl OriginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginKind::Dev => "dev",
            OriginKind::Live => "live",
        }
    }
}

impl std::fmt::Display for OriginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upstream origin. Immutable after startup.
#[derive(Debug, Clone)]
pub struct Origin {
    pub kind: OriginKind,
    pub base_url: Url,
    pub session_id: String,
}

impl Origin {
    pub fn new(kind: OriginKind, base_url: Url, session_id: impl Into<String>) -> Self {
        Self {
            kind,
            base_url,
            session_id: session_id.into(),
        }
    }

    /// Build an origin from its (already validated) config section.
    pub fn from_config(kind: OriginKind, config: &OriginConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| UpstreamError::InvalidUrl {
            origin: kind,
            url: config.base_url.clone(),
            source,
        })?;
        Ok(Self::new(kind, base_url, config.session_id.clone()))
    }

    /// Absolute URL for an inbound `path?query`, appended verbatim to the
    /// base address.
    pub fn url_for(&self, path_and_query: &str) -> Result<Url, UpstreamError> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path_and_query
        );
        Url::parse(&joined).map_err(|source| UpstreamError::InvalidUrl {
            origin: self.kind,
            url: joined,
            source,
        })
    }
}
