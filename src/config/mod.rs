//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyConfig::default()
//!     → loader.rs (optional TOML file)
//!     → cli.rs (command line overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once by HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; origins and jars live for the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::CliArgs;
pub use loader::{load_config, load_from_args, ConfigError};
pub use schema::{
    AnchorMarkers, CookieConfig, ListenerConfig, LogFormat, MergeConfig, ObservabilityConfig, OriginConfig,
    OriginsConfig, ProxyConfig, RoutingConfig, UpstreamConfig,
};
