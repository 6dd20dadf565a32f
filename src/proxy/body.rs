//! Inbound body relay for streaming handlers.

use std::io;

use axum::body::{Body, Bytes, HttpBody};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Chunks buffered between the client and the upstream request.
const RELAY_CAPACITY: usize = 16;

/// Turn the inbound body into an upstream request body without waiting for
/// it to finish.
///
/// A pump task forwards chunks as they arrive. An inbound read error is
/// passed on as a stream error, which makes reqwest abort the upstream
/// request. If the upstream side goes away first, the pump stops reading.
/// Returns `None` for requests that carry no body.
pub fn relay_inbound(body: Body) -> Option<reqwest::Body> {
    if body.is_end_stream() {
        return None;
    }
    Some(reqwest::Body::wrap_stream(pump(body)))
}

/// Spawn the pump task and return the receiving end.
fn pump(body: Body) -> ReceiverStream<Result<Bytes, io::Error>> {
    let (tx, rx) = mpsc::channel::<Result<Bytes, io::Error>>(RELAY_CAPACITY);

    tokio::spawn(async move {
        let mut stream = body.into_data_stream();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    if tx.send(Ok(bytes)).await.is_err() {
                        tracing::debug!("Upstream stopped reading request body");
                        return;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Inbound body failed, aborting upstream request");
                    let _ = tx
                        .send(Err(io::Error::new(io::ErrorKind::ConnectionAborted, e.to_string())))
                        .await;
                    return;
                }
            }
        }
    });

    ReceiverStream::new(rx)
}
