//! WebSocket transport.
//!
//! Every text or binary frame is fed to the session framer, so web clients
//! may split or batch `#%`-terminated messages across frames like TCP
//! clients do. Outbound wire strings are sent one per text frame.

use std::net::SocketAddr;

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, ConnectInfo, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::time::{Duration, MissedTickBehavior};

use crate::app_state::AppState;
use crate::context::TransportKind;
use crate::transport::session::{Flow, Session};
use crate::transport::KEEPALIVE_CHECK_MS;

pub async fn ws_upgrade(
    State(app): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_session(app, peer, socket))
}

async fn run_session(app: AppState, peer: SocketAddr, socket: WebSocket) {
    let (mut session, mut out_rx) = match Session::open(app, peer, TransportKind::Ws) {
        Ok(opened) => opened,
        Err(e) => {
            tracing::info!(%peer, error = %e, "websocket connection refused");
            return;
        }
    };

    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut keepalive_tick = tokio::time::interval(Duration::from_millis(KEEPALIVE_CHECK_MS));
    keepalive_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reason = loop {
        tokio::select! {
            maybe_out = out_rx.recv() => {
                let Some(wire) = maybe_out else { break "outbound closed"; };
                if ws_tx.send(Message::Text(wire)).await.is_err() {
                    break "write failed";
                }
            }

            incoming = ws_rx.next() => {
                let Some(Ok(msg)) = incoming else { break "closed by peer"; };
                let flow = match msg {
                    Message::Text(s) => session.on_bytes(s.as_bytes()).await,
                    Message::Binary(b) => session.on_bytes(&b).await,
                    Message::Ping(payload) => {
                        let _ = ws_tx.send(Message::Pong(payload)).await;
                        Flow::Continue
                    }
                    Message::Pong(_) => Flow::Continue,
                    Message::Close(_) => break "closed by peer",
                };
                if let Flow::Close(reason) = flow {
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

    let _ = ws_tx.close().await;
    tracing::debug!(client = session.client_id(), reason, "websocket session ended");
}
