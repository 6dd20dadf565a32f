//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered classification)
//!     → matcher.rs (prefix, then extension)
//!     → Route::{AppMerge, Asset, LivePassthrough}
//!
//! Route Compilation (at startup):
//!     RoutingConfig
//!     → Compile matchers
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always yields the same route
//! - No "no match" outcome; live passthrough is the fallback

pub mod matcher;
pub mod router;

pub use router::{Route, Router};
