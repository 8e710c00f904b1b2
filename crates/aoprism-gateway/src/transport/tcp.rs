//! Raw TCP transport for desktop clients.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, MissedTickBehavior};

use crate::app_state::AppState;
use crate::context::TransportKind;
use crate::transport::session::{Flow, Session};
use crate::transport::KEEPALIVE_CHECK_MS;

const READ_CHUNK: usize = 4096;

/// Accept connections until the listener fails permanently.
///
/// Per-connection accept errors (e.g. fd exhaustion) are logged and the loop
/// keeps going.
pub async fn serve_tcp(listener: TcpListener, app: AppState) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    tracing::debug!(%peer, error = %e, "set_nodelay failed");
                }
                tokio::spawn(run_tcp(app.clone(), stream, peer));
            }
            Err(e) => {
                tracing::warn!(error = %e, "tcp accept failed");
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }
}

pub async fn run_tcp(app: AppState, stream: TcpStream, peer: SocketAddr) {
    let (mut session, mut out_rx) = match Session::open(app, peer, TransportKind::Tcp) {
        Ok(opened) => opened,
        Err(e) => {
            tracing::info!(%peer, error = %e, "tcp connection refused");
            return;
        }
    };

    let (mut reader, mut writer) = stream.into_split();
    let mut buf = vec![0u8; READ_CHUNK];
    let mut keepalive_tick = tokio::time::interval(Duration::from_millis(KEEPALIVE_CHECK_MS));
    keepalive_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reason = loop {
        tokio::select! {
            maybe_out = out_rx.recv() => {
                let Some(wire) = maybe_out else { break "outbound closed"; };
                if writer.write_all(wire.as_bytes()).await.is_err() {
                    break "write failed";
                }
            }

            read = reader.read(&mut buf) => {
                let n = match read {
                    Ok(0) => break "closed by peer",
                    Ok(n) => n,
                    Err(_) => break "read failed",
                };
                if let Flow::Close(reason) = session.on_bytes(&buf[..n]).await {
                    break reason;
                }
            }

            _ = keepalive_tick.tick() => {
                if session.keepalive_expired() {
                    break "keepalive timeout";
                }
            }
        }
    };

    let _ = writer.shutdown().await;
    tracing::debug!(client = session.client_id(), reason, "tcp session ended");
}
