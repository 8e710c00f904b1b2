use std::net::SocketAddr;

use aoprism_core::protocol::{Dialect, Packet};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Which listener accepted the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Tcp,
    Ws,
}

impl TransportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Tcp => "tcp",
            TransportKind::Ws => "ws",
        }
    }
}

/// Mutable state of one connection, owned by its session task.
///
/// Handlers receive it as `&mut`; anything other sessions need to see
/// (character, area, pose) is mirrored into the shared registry.
#[derive(Debug)]
pub struct ClientCtx {
    pub client_id: u64,
    pub peer: SocketAddr,
    pub transport: TransportKind,
    /// Hardware id from `HI`.
    pub hdid: Option<String>,
    /// Client software and version from `ID`.
    pub software: Option<(String, String)>,
    /// Selected character, `-1` while spectating.
    pub char_id: i64,
    /// Current area, set once the join sequence finished.
    pub area: Option<usize>,
    /// Dialect of the last IC message this client sent.
    pub dialect: Option<Dialect>,
    pub last_keepalive: Instant,
    tx: mpsc::Sender<String>,
}

impl ClientCtx {
    pub fn new(client_id: u64, peer: SocketAddr, transport: TransportKind, tx: mpsc::Sender<String>) -> Self {
        Self {
            client_id,
            peer,
            transport,
            hdid: None,
            software: None,
            char_id: -1,
            area: None,
            dialect: None,
            last_keepalive: Instant::now(),
            tx,
        }
    }

    /// Queue a packet for this client only.
    ///
    /// Never awaits: the session loop that drains the queue is the caller.
    pub fn reply(&self, packet: Packet) {
        if self.tx.try_send(packet.to_wire()).is_err() {
            tracing::debug!(client = self.client_id, cmd = %packet.command, "reply dropped, queue full");
        }
    }

    pub fn is_spectator(&self) -> bool {
        self.char_id < 0
    }

    pub fn touch_keepalive(&mut self) {
        self.last_keepalive = Instant::now();
    }
}
