use aoprism_core::protocol::Packet;

/// Quality-of-Service strategy for outgoing delivery.
#[derive(Debug, Clone, Copy, Default)]
pub enum QoS {
    /// Do not await; if the recipient's queue is full, drop.
    #[default]
    Lossy,
    /// Await queue space, giving up after `timeout_ms` (0 = no timeout).
    Reliable { timeout_ms: u64 },
}

/// Application-level outgoing message.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub qos: QoS,
    pub packet: Packet,
    /// Client whose own session task publishes this. Its queue is drained by
    /// that same task, so delivery to it never waits.
    pub origin: Option<u64>,
}

impl Outgoing {
    pub fn lossy(packet: Packet) -> Self {
        Self {
            qos: QoS::Lossy,
            packet,
            origin: None,
        }
    }

    pub fn reliable(packet: Packet, timeout_ms: u64) -> Self {
        Self {
            qos: QoS::Reliable { timeout_ms },
            packet,
            origin: None,
        }
    }

    pub fn from_client(mut self, client_id: u64) -> Self {
        self.origin = Some(client_id);
        self
    }
}
