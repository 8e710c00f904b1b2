use async_trait::async_trait;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::{Packet, PoseState};

use crate::app_state::AppState;
use crate::context::ClientCtx;
use crate::dispatch::CommandHandler;

/// `CC`: pick a character (or `-1` to spectate).
#[derive(Default)]
pub struct CharacterService;

impl CharacterService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for CharacterService {
    fn commands(&self) -> &'static [&'static str] {
        &["CC"]
    }

    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        let char_id: i64 = packet
            .args
            .get(1)
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| AoError::BadRequest("CC requires a character id".into()))?;

        let folder = if char_id == -1 {
            ""
        } else {
            app.cfg()
                .character(char_id)
                .ok_or_else(|| AoError::NotAllowed(format!("no character {char_id}")))?
        };

        let rt = app.realtime();
        if char_id != -1 {
            if let Some(area) = client.area {
                let ids = rt.presence.clients_in(area);
                if rt.sessions.char_taken(&ids, char_id, client.client_id) {
                    return Err(AoError::NotAllowed(format!("character {char_id} taken")));
                }
            }
        }

        rt.sessions
            .set_character(client.client_id, char_id, PoseState::idle(folder));
        client.char_id = char_id;
        tracing::info!(client = client.client_id, char_id, folder, "character selected");

        client.reply(
            Packet::new("PV")
                .arg(client.client_id)
                .arg("CID")
                .arg(char_id),
        );
        Ok(())
    }
}

/// Release the client's character if another client in `area` holds it.
///
/// Called before entering an area, so the character chosen outside (or in a
/// different area) cannot end up duplicated. The client becomes a spectator
/// and is told so with a `PV`.
pub(crate) fn release_if_taken(app: &AppState, client: &mut ClientCtx, area: usize) {
    if client.is_spectator() {
        return;
    }
    let rt = app.realtime();
    let ids = rt.presence.clients_in(area);
    if !rt.sessions.char_taken(&ids, client.char_id, client.client_id) {
        return;
    }

    tracing::info!(client = client.client_id, char_id = client.char_id, area, "character taken in target area, now spectating");
    rt.sessions
        .set_character(client.client_id, -1, PoseState::default());
    client.char_id = -1;
    client.reply(
        Packet::new("PV")
            .arg(client.client_id)
            .arg("CID")
            .arg(-1),
    );
}
