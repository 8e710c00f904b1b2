//! Transport-agnostic session driver.
//!
//! TCP and WebSocket connections both feed raw bytes into a [`Session`], which
//! frames them, applies flood control, and dispatches each packet. The
//! dispatch call is the failure boundary: recoverable handler errors are
//! logged and the connection stays open; anything else (including a panic)
//! closes this connection only.

use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::{Framer, Packet};
use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::app_state::AppState;
use crate::context::{ClientCtx, TransportKind};
use crate::policy::{ConnRateLimiter, FloodDecision};
use crate::realtime::Connection;

/// Outbound queue depth per client.
pub const OUTBOUND_QUEUE: usize = 1024;

/// What the transport loop should do after feeding bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close(&'static str),
}

pub struct Session {
    app: AppState,
    ctx: ClientCtx,
    framer: Framer,
    flood: ConnRateLimiter,
    keepalive_timeout: Duration,
}

impl Session {
    /// Register a new client and queue the handshake opener.
    ///
    /// Returns the receiving end of the client's outbound queue; the
    /// transport writes everything it yields to the socket.
    pub fn open(
        app: AppState,
        peer: SocketAddr,
        transport: TransportKind,
    ) -> Result<(Self, mpsc::Receiver<String>)> {
        let server = &app.cfg().server;
        if app.player_count() >= server.max_players {
            return Err(AoError::NotAllowed("server full".into()));
        }

        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE);
        let rt = app.realtime();
        let client_id = rt.sessions.allocate_id();
        rt.sessions.insert(client_id, Connection { tx: tx.clone() });

        let labels = [("transport", transport.as_str())];
        app.metrics().connections.inc(&labels);
        app.metrics().active_sessions.inc(&labels);

        let ctx = ClientCtx::new(client_id, peer, transport, tx);
        ctx.reply(Packet::new("decryptor").arg(34));
        tracing::info!(client = client_id, %peer, transport = transport.as_str(), "client connected");

        let session = Self {
            framer: Framer::with_max_buffer(server.max_buffer_bytes),
            flood: ConnRateLimiter::from_config(&app.cfg().flood),
            keepalive_timeout: Duration::from_millis(server.keepalive_timeout_ms),
            ctx,
            app,
        };
        Ok((session, rx))
    }

    pub fn client_id(&self) -> u64 {
        self.ctx.client_id
    }

    pub fn ctx(&self) -> &ClientCtx {
        &self.ctx
    }

    pub fn keepalive_expired(&self) -> bool {
        self.ctx.last_keepalive.elapsed() >= self.keepalive_timeout
    }

    /// Feed one network read.
    pub async fn on_bytes(&mut self, data: &[u8]) -> Flow {
        let framed = self.framer.feed(data);
        if let Some(dropped) = framed.overflowed {
            tracing::debug!(client = self.ctx.client_id, dropped, "unterminated input discarded");
            self.app
                .metrics()
                .framing_overflows
                .inc(&[("transport", self.ctx.transport.as_str())]);
        }

        for raw in framed.messages {
            let Some(packet) = Packet::parse(&raw) else {
                continue;
            };
            if self.flood.check() == FloodDecision::Drop {
                tracing::debug!(client = self.ctx.client_id, cmd = %packet.command, "flood limit, dropped");
                self.app.metrics().flood_drops.inc(&[]);
                continue;
            }
            if let Flow::Close(reason) = self.dispatch(packet).await {
                return Flow::Close(reason);
            }
        }
        Flow::Continue
    }

    async fn dispatch(&mut self, packet: Packet) -> Flow {
        let cmd = packet.command.clone();
        let dispatcher = self.app.dispatcher();
        let res = AssertUnwindSafe(dispatcher.dispatch(&self.app, &mut self.ctx, packet))
            .catch_unwind()
            .await;

        match res {
            Ok(Ok(())) => Flow::Continue,
            Ok(Err(e)) if e.client_code().is_recoverable() => {
                tracing::debug!(client = self.ctx.client_id, cmd = %cmd, error = %e, "command ignored");
                Flow::Continue
            }
            Ok(Err(e)) => {
                tracing::warn!(client = self.ctx.client_id, cmd = %cmd, error = %e, "command failed, disconnecting");
                Flow::Close("handler error")
            }
            Err(_) => {
                tracing::warn!(client = self.ctx.client_id, cmd = %cmd, "handler panicked, disconnecting");
                Flow::Close("handler panic")
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.app.realtime().disconnect(self.ctx.client_id);
        self.app
            .metrics()
            .active_sessions
            .dec(&[("transport", self.ctx.transport.as_str())]);
        tracing::info!(client = self.ctx.client_id, "client disconnected");
    }
}
