//! Local development proxy that stitches a dev origin (assets, app shell)
//! and a live origin (authenticated data) into one address.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                     lep-proxy                    │
//!   Browser request   │  ┌────────┐   ┌─────────┐   ┌─────────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ routing │──▶│      proxy      │  │
//!                     │  │ server │   │ classify│   │ merge│asset│live│  │
//!                     │  └────────┘   └─────────┘   └────────┬────────┘  │
//!                     │                                      │           │
//!                     │                            ┌─────────▼────────┐  │     dev origin
//!                     │                            │     upstream     │──┼──▶ (assets, shell)
//!                     │                            │ client per origin│  │
//!                     │                            └─────────┬────────┘──┼──▶ live origin
//!                     │                                      │           │    (data)
//!                     │                            ┌─────────▼────────┐  │
//!                     │                            │  session jars    │  │
//!                     │                            │  dev │ live      │  │
//!                     │                            └──────────────────┘  │
//!                     │  config · observability · lifecycle              │
//!                     └──────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries `X-Lep-Status` (`Dev`, `Live`, `Mixed` or `Error`)
//! and, when degraded, `X-Lep-Error`.

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod routing;
pub mod session;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
