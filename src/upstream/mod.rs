//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → client.rs fetch()  (buffered GET, whole body as text)
//!     → client.rs send()   (any method, body streamed both ways)
//!     → origin.rs          (base address + inbound path?query)
//!     → reqwest + SessionJar (cookies in, Set-Cookie recorded)
//! ```

pub mod client;
pub mod error;
pub mod origin;

pub use client::{BufferedResponse, UpstreamClient};
pub use error::UpstreamError;
pub use origin::{Origin, OriginKind};
