//! Upstream error types.

use crate::upstream::origin::OriginKind;

/// Errors raised while talking to an upstream origin.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid {origin} address {url:?}: {source}")]
    InvalidUrl {
        origin: OriginKind,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build {origin} client: {source}")]
    Client {
        origin: OriginKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{origin} request to {url} failed: {source}")]
    Transport {
        origin: OriginKind,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn origin(&self) -> OriginKind {
        match self {
            UpstreamError::InvalidUrl { origin, .. }
            | UpstreamError::Client { origin, .. }
            | UpstreamError::Transport { origin, .. } => *origin,
        }
    }

    /// The error followed by every underlying cause, joined with `: `.
    ///
    /// reqwest keeps the interesting part (connection refused, TLS failure)
    /// a couple of levels down the source chain.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut source = std::error::Error::source(self).and_then(|e| e.source());
        while let Some(cause) = source {
            let text = cause.to_string();
            if !description.contains(&text) {
                description.push_str(": ");
                description.push_str(&text);
            }
            source = cause.source();
        }
        description
    }
}
