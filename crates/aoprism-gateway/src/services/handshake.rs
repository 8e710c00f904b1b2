//! Join sequence: identification, content lists, area entry and keepalive.

use async_trait::async_trait;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::Packet;

use crate::app_state::{AppState, SERVER_VERSION};
use crate::config::AreaConfig;
use crate::context::ClientCtx;
use crate::dispatch::CommandHandler;

use super::character::release_if_taken;

/// Software name reported in `ID`.
pub const SOFTWARE: &str = "aoprism";

/// Capabilities advertised in `FL`.
const FEATURES: &[&str] = &[
    "noencryption",
    "yellowtext",
    "prezoom",
    "flipping",
    "customobjections",
    "fastloading",
    "deskmod",
    "evidence",
    "cccc_ic_support",
    "arup",
    "looping_sfx",
    "additive",
    "effects",
    "y_offset",
    "expanded_desk_mods",
];

#[derive(Default)]
pub struct HandshakeService;

impl HandshakeService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for HandshakeService {
    fn commands(&self) -> &'static [&'static str] {
        &["HI", "ID", "askchaa", "RC", "RM", "RD", "CH"]
    }

    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        match packet.command.as_str() {
            "HI" => hello(app, client, &packet),
            "ID" => {
                let software = packet.args.first().cloned().unwrap_or_default();
                let version = packet.args.get(1).cloned().unwrap_or_default();
                tracing::debug!(client = client.client_id, %software, %version, "client identified");
                client.software = Some((software, version));
                Ok(())
            }
            "askchaa" => {
                let cfg = app.cfg();
                client.reply(
                    Packet::new("SI")
                        .arg(cfg.characters.len())
                        .arg(0)
                        .arg(cfg.areas.len() + cfg.music.len()),
                );
                Ok(())
            }
            "RC" => {
                let mut sc = Packet::new("SC");
                for name in &app.cfg().characters {
                    sc = sc.text(name);
                }
                client.reply(sc);
                Ok(())
            }
            "RM" => {
                let cfg = app.cfg();
                let mut sm = Packet::new("SM");
                for area in &cfg.areas {
                    sm = sm.text(&area.name);
                }
                for track in &cfg.music {
                    sm = sm.text(track);
                }
                client.reply(sm);
                Ok(())
            }
            "RD" => enter(app, client),
            "CH" => {
                client.touch_keepalive();
                client.reply(Packet::new("CHECK"));
                Ok(())
            }
            other => Err(AoError::BadRequest(format!("handshake: unexpected {other}"))),
        }
    }
}

fn hello(app: &AppState, client: &mut ClientCtx, packet: &Packet) -> Result<()> {
    let hdid = packet
        .args
        .first()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| AoError::BadRequest("HI requires a hardware id".into()))?;
    client.hdid = Some(hdid.clone());

    let server = &app.cfg().server;
    client.reply(
        Packet::new("ID")
            .arg(client.client_id)
            .arg(SOFTWARE)
            .arg(SERVER_VERSION),
    );
    client.reply(
        Packet::new("PN")
            .arg(app.player_count())
            .arg(server.max_players)
            .text(&server.description),
    );
    let mut fl = Packet::new("FL");
    for feature in FEATURES {
        fl = fl.arg(feature);
    }
    client.reply(fl);

    if let Some(motd) = &server.motd {
        client.reply(Packet::new("CT").text(&server.name).text(motd).arg(1));
    }
    Ok(())
}

/// Place the client in the first area and send the area state.
fn enter(app: &AppState, client: &mut ClientCtx) -> Result<()> {
    let area = app
        .cfg()
        .areas
        .first()
        .ok_or_else(|| AoError::Internal("no areas configured".into()))?;

    release_if_taken(app, client, 0);
    app.realtime().presence.join(0, client.client_id);
    client.area = Some(0);
    tracing::info!(client = client.client_id, area = %area.name, "joined area");

    client.reply(Packet::new("DONE"));
    client.reply(Packet::new("BN").text(&area.background));
    client.reply(evidence_list(area));
    Ok(())
}

pub(crate) fn evidence_list(area: &AreaConfig) -> Packet {
    let mut le = Packet::new("LE");
    for ev in &area.evidence {
        le = le.tuple(&[ev.name.as_str(), ev.description.as_str(), ev.image.as_str()]);
    }
    le
}
