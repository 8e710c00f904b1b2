use std::sync::Arc;

use aoprism_core::protocol::Candidate;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::time::{timeout, Duration};

use crate::realtime::core::{Presence, SessionRegistry};
use crate::realtime::types::{Outgoing, QoS};

/// RealtimeCore: egress engine (send to client / publish to area).
pub struct RealtimeCore {
    pub sessions: Arc<SessionRegistry>,
    pub presence: Arc<Presence>,
}

impl Default for RealtimeCore {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeCore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new()),
            presence: Arc::new(Presence::new()),
        }
    }

    /// Publish to every client in `area` according to the packet's QoS.
    pub async fn publish_area(&self, area: usize, out: Outgoing) {
        match out.qos {
            QoS::Lossy => self.publish_area_lossy(area, &out),
            QoS::Reliable { timeout_ms } => self.publish_area_reliable(area, &out, timeout_ms).await,
        }
    }

    /// Lossy broadcast: try_send only, drop if queue is full.
    pub fn publish_area_lossy(&self, area: usize, out: &Outgoing) {
        let wire = out.packet.to_wire();
        for id in self.presence.clients_in(area) {
            if let Some(conn) = self.sessions.connection(id) {
                let _ = conn.tx.try_send(wire.clone());
            }
        }
    }

    /// Reliable broadcast: send concurrently with optional timeout per client.
    /// The origin, if any, gets a `try_send` instead.
    pub async fn publish_area_reliable(&self, area: usize, out: &Outgoing, timeout_ms: u64) {
        let wire = out.packet.to_wire();
        let mut futs = FuturesUnordered::new();
        for id in self.presence.clients_in(area) {
            if let Some(conn) = self.sessions.connection(id) {
                if out.origin == Some(id) {
                    if conn.tx.try_send(wire.clone()).is_err() {
                        tracing::debug!(client = id, "own queue full, echo dropped");
                    }
                    continue;
                }
                let msg = wire.clone();
                futs.push(async move {
                    let sent = if timeout_ms > 0 {
                        matches!(
                            timeout(Duration::from_millis(timeout_ms), conn.tx.send(msg)).await,
                            Ok(Ok(()))
                        )
                    } else {
                        conn.tx.send(msg).await.is_ok()
                    };
                    if !sent {
                        tracing::debug!(client = id, "reliable delivery failed");
                    }
                });
            }
        }

        while futs.next().await.is_some() {}
    }

    /// Pairing snapshot of `area`, ascending by client id, without `except`.
    pub fn candidates_in(&self, area: usize, except: u64) -> Vec<Candidate> {
        let ids = self.presence.clients_in(area);
        self.sessions.candidates(&ids, except)
    }

    /// Drop every trace of a client.
    pub fn disconnect(&self, client_id: u64) {
        self.presence.leave(client_id);
        self.sessions.remove(client_id);
    }
}
