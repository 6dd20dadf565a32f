//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → routing (path → Route)
//!     → proxy handler for that route
//!         → request.rs (header copy for forwarding)
//!         → response.rs (outcome headers, streaming relay)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use response::{OutcomeStatus, X_LEP_ERROR, X_LEP_STATUS};
pub use server::{AppState, HttpServer};
