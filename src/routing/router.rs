//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled matchers
//! - Classify a request path into exactly one route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Total: every path maps to a route, live passthrough is the fallback
//! - Order-sensitive: the app prefix is checked before asset extensions

use crate::config::RoutingConfig;
use crate::routing::matcher::{ExtensionMatcher, Matcher, PathPrefixMatcher};

/// Where a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Dev shell merged with the live page.
    AppMerge,
    /// Static asset streamed from dev.
    Asset,
    /// Everything else, streamed from live.
    LivePassthrough,
}

impl Route {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::AppMerge => "app_merge",
            Route::Asset => "asset",
            Route::LivePassthrough => "live",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path classifier.
#[derive(Debug)]
pub struct Router {
    app: Box<dyn Matcher>,
    asset: Box<dyn Matcher>,
}

impl Router {
    pub fn new(app: Box<dyn Matcher>, asset: Box<dyn Matcher>) -> Self {
        Self { app, asset }
    }

    /// Compile the routing section of the config.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(
            Box::new(PathPrefixMatcher::new(config.app_prefix.clone())),
            Box::new(ExtensionMatcher::new(config.asset_extensions.iter().cloned())),
        )
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> Route {
        if self.app.matches(path) {
            Route::AppMerge
        } else if self.asset.matches(path) {
            Route::Asset
        } else {
            Route::LivePassthrough
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
