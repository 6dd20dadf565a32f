//! Process-wide session store: one jar per origin.

use std::sync::Arc;

use crate::upstream::origin::{Origin, OriginKind};
use crate::session::jar::SessionJar;

/// Both session jars, built once at startup and shared by handle.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dev: Arc<SessionJar>,
    live: Arc<SessionJar>,
}

impl SessionStore {
    /// Create both jars and seed each with its origin's session cookie.
    pub fn seed(dev: &Origin, live: &Origin, cookie_name: &str) -> Self {
        let store = Self {
            dev: Arc::new(SessionJar::new(&dev.base_url)),
            live: Arc::new(SessionJar::new(&live.base_url)),
        };
        store.dev.seed(cookie_name, &dev.session_id);
        store.live.seed(cookie_name, &live.session_id);

        tracing::info!(
            dev_origin = %dev.base_url,
            live_origin = %live.base_url,
            cookie = %cookie_name,
            "Session jars seeded"
        );
        store
    }

    /// Jar for the given origin.
    pub fn jar(&self, kind: OriginKind) -> &Arc<SessionJar> {
        match kind {
            OriginKind::Dev => &self.dev,
            OriginKind::Live => &self.live,
        }
    }

    pub fn dev(&self) -> &Arc<SessionJar> {
        &self.dev
    }

    pub fn live(&self) -> &Arc<SessionJar> {
        &self.live
    }
}
