// WebSocket push server: forwards board updates to every connected viewer.

use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, warn};

use crate::poller::LatestUpdate;
use crate::protocol::BoardUpdate;

/// Run the push server on `addr`, serving updates from `updates`.
///
/// Each accepted connection is handshaked and served on its own task, so a
/// slow client never holds up the others. The server runs until the task
/// is cancelled or accepting fails.
pub async fn run(addr: SocketAddr, updates: watch::Receiver<LatestUpdate>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!("WebSocket push server listening on {local_addr}");

    loop {
        let (stream, peer) = listener.accept().await?;
        let updates = updates.clone();

        tokio::spawn(async move {
            let peer = peer.to_string();
            let ws_stream = match tokio_tungstenite::accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("WebSocket handshake failed for {peer}: {e}");
                    return;
                }
            };
            info!("Push client connected: {peer}");

            let (write, read) = ws_stream.split();
            serve_client(write, read, updates, &peer).await;
            info!("Push client disconnected: {peer}");
        });
    }
}

/// Serve one client until it disconnects or the publisher goes away.
///
/// The latest update (if any) is sent immediately, then every new one as
/// it is published. Incoming text, binary, and ping frames are ignored; a
/// close frame or a read error ends the session.
///
/// Generic over the sink and stream halves so it can be tested with
/// in-memory collections instead of sockets.
pub async fn serve_client<W, R>(
    mut write: W,
    mut read: R,
    mut updates: watch::Receiver<LatestUpdate>,
    addr: &str,
) where
    W: Sink<Message> + Unpin,
    W::Error: Display,
    R: Stream<Item = Result<Message, WsError>> + Unpin,
{
    let current = updates.borrow_and_update().clone();
    if let Some(update) = current {
        if let Err(e) = send_update(&mut write, &update).await {
            warn!("Failed to send initial update to {addr}: {e}");
            return;
        }
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    debug!("Publisher closed; ending session for {addr}");
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                if let Some(update) = latest {
                    if let Err(e) = send_update(&mut write, &update).await {
                        warn!("Failed to send update to {addr}: {e}");
                        break;
                    }
                }
            }
            incoming = read.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    info!("Client {addr} closed the connection");
                    break;
                }
                Some(Err(e)) => {
                    warn!("WebSocket error from {addr}: {e}");
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = write.close().await;
}

async fn send_update<W>(write: &mut W, update: &Arc<BoardUpdate>) -> Result<(), W::Error>
where
    W: Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(update.as_ref()) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to encode board update: {e}");
            return Ok(());
        }
    };
    write.send(Message::Text(json.into())).await
}
