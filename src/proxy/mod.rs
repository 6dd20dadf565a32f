//! Proxy handlers.
//!
//! # Data Flow
//! ```text
//! Route::AppMerge        → merge.rs  (dev + live, buffered, joined, spliced)
//! Route::Asset           → asset.rs  (dev, streamed)
//! Route::LivePassthrough → live.rs   (live, streamed, headers rewritten)
//!
//! Shared:
//!     context.rs  (clients, jars, anchor, referer)
//!     body.rs     (inbound body → upstream request, incrementally)
//!     cookies.rs  (Set-Cookie copy, Secure stripped)
//!     anchor.rs   (region location strategies)
//!     error.rs    (failures → Error outcome responses)
//! ```
//!
//! # Design Decisions
//! - Each handler owns the whole request/response lifecycle
//! - No handler lets an upstream failure escape: every path returns a response
//! - Dropping a handler's future drops its upstream exchange

pub mod anchor;
pub mod asset;
pub mod body;
pub mod context;
pub mod cookies;
pub mod error;
pub mod live;
pub mod merge;

pub use context::ProxyContext;
pub use error::{ProxyError, SetupError};
