//! Debug origin for the proxy.
//!
//! Logs the URL and headers of every request, sets a cookie on every
//! response and answers `hello`. Point `--dev-url` or `--live-url` at it to
//! watch exactly what the proxy forwards without needing HTTPS upstreams.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "lep-echo")]
#[command(about = "Echo server for debugging lep-proxy", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Cookie set on every response
    #[arg(long, default_value = "hello=world; Path=/")]
    cookie: String,
}

async fn echo(cookie: HeaderValue, request: Request<Body>) -> Response {
    let headers: serde_json::Map<String, serde_json::Value> = request
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                serde_json::Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();

    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        headers = %serde_json::Value::Object(headers),
        "Request received"
    );

    ([(header::SET_COOKIE, cookie)], "hello").into_response()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lep_echo=info".into()),
        )
        .init();

    let args = Args::parse();
    let cookie = HeaderValue::from_str(&args.cookie)?;

    let app = Router::new().fallback(move |request: Request<Body>| echo(cookie.clone(), request));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Echo server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
