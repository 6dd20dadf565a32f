//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::ProxyConfig;

#[derive(Parser, Debug)]
#[command(name = "lep-proxy")]
#[command(
    about = "Proxy requests so that source files come from the dev origin and data comes from the live origin",
    long_about = None
)]
pub struct CliArgs {
    /// Session id for the dev origin
    pub dev_session_id: Option<String>,

    /// Session id for the live origin
    pub live_session_id: Option<String>,

    /// Port to listen on [default: 5050]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base address of the dev origin [default: https://dev.logentries.net]
    #[arg(long)]
    pub dev_url: Option<String>,

    /// Base address of the live origin [default: https://logentries.com]
    #[arg(long)]
    pub live_url: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Overlay the arguments that were given onto `config`.
    pub fn apply(self, mut config: ProxyConfig) -> ProxyConfig {
        if let Some(id) = self.dev_session_id {
            config.origins.dev.session_id = id;
        }
        if let Some(id) = self.live_session_id {
            config.origins.live.session_id = id;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(url) = self.dev_url {
            config.origins.dev.base_url = url;
        }
        if let Some(url) = self.live_url {
            config.origins.live.base_url = url;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        config
    }
}
