use async_trait::async_trait;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::Packet;

use crate::app_state::AppState;
use crate::context::ClientCtx;
use crate::dispatch::CommandHandler;
use crate::realtime::Outgoing;

/// `CT`: out-of-character chat, relayed to the sender's area.
#[derive(Default)]
pub struct OocService;

impl OocService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for OocService {
    fn commands(&self) -> &'static [&'static str] {
        &["CT"]
    }

    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        let area = client
            .area
            .ok_or_else(|| AoError::NotAllowed("CT before joining an area".into()))?;

        let name = packet.args.first().map(|s| s.trim()).unwrap_or_default();
        let message = packet.args.get(1).map(|s| s.trim()).unwrap_or_default();
        if name.is_empty() || message.is_empty() {
            return Err(AoError::BadRequest("CT requires a name and a message".into()));
        }

        // already escaped on the wire; relay as-is
        let out = Packet::new("CT").arg(name).arg(message).arg(0);
        app.realtime().publish_area(area, Outgoing::lossy(out)).await;
        Ok(())
    }
}
