use clap::Parser;

use lep_proxy::config::{load_from_args, CliArgs};
use lep_proxy::lifecycle::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config = match load_from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("lep-proxy: {}", e);
            std::process::exit(2);
        }
    };

    startup::run(config).await
}
