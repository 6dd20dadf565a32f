//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     dev/live Origin (session id)
//!     → store.rs (build both jars, seed `sessionid=<id>; Path=/`)
//!
//! Per upstream exchange (driven by reqwest):
//!     request  → jar.rs cookies(url)      → Cookie header
//!     response → jar.rs set_cookies(url)  → jar updated (own origin only)
//! ```
//!
//! # Design Decisions
//! - Exactly two jars per process, never swapped or torn down
//! - A jar rejects cookies from any origin but its own
//! - Concurrent access goes through `DashMap`; no extra locking

pub mod cookie;
pub mod jar;
pub mod store;

pub use jar::SessionJar;
pub use store::SessionStore;
