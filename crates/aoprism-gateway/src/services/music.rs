use async_trait::async_trait;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::{unescape, Packet};

use crate::app_state::AppState;
use crate::context::ClientCtx;
use crate::dispatch::CommandHandler;
use crate::realtime::Outgoing;

use super::character::release_if_taken;
use super::handshake::evidence_list;

/// `MC`: either an area change or a track change, resolved by name.
///
/// Area names take precedence over tracks with the same name.
#[derive(Default)]
pub struct MusicService;

impl MusicService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for MusicService {
    fn commands(&self) -> &'static [&'static str] {
        &["MC"]
    }

    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        let raw = packet
            .args
            .first()
            .ok_or_else(|| AoError::BadRequest("MC requires a name".into()))?;
        let name = unescape(raw);
        let cfg = app.cfg();

        if let Some(target) = cfg.area_index(&name) {
            return move_to(app, client, target);
        }

        if !cfg.music.iter().any(|t| *t == name) {
            return Err(AoError::BadRequest(format!("unknown track or area: {name}")));
        }
        let area = client
            .area
            .ok_or_else(|| AoError::NotAllowed("MC before joining an area".into()))?;
        if client.is_spectator() {
            return Err(AoError::NotAllowed("spectators cannot change music".into()));
        }

        let showname = packet.args.get(2).map(String::as_str).unwrap_or_default();
        let out = Packet::new("MC")
            .text(&name)
            .arg(client.char_id)
            .arg(showname);
        tracing::debug!(client = client.client_id, area, track = %name, "music changed");
        app.realtime().publish_area(area, Outgoing::lossy(out)).await;
        Ok(())
    }
}

fn move_to(app: &AppState, client: &mut ClientCtx, target: usize) -> Result<()> {
    if client.area == Some(target) {
        return Ok(());
    }
    let area = app
        .cfg()
        .areas
        .get(target)
        .ok_or_else(|| AoError::Internal(format!("area index {target} out of range")))?;

    release_if_taken(app, client, target);
    let previous = app.realtime().presence.join(target, client.client_id);
    client.area = Some(target);
    tracing::info!(client = client.client_id, from = ?previous, area = %area.name, "changed area");

    client.reply(Packet::new("BN").text(&area.background));
    client.reply(evidence_list(area));
    Ok(())
}
