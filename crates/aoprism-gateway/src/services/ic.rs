//! `MS`: in-character messages.
//!
//! Decode, validate against the sender's session, resolve pairs against a
//! snapshot of the area, then broadcast the canonical outbound layout.
//! Nothing here is fatal for the session: bad input is dropped with a trace.

use std::sync::Arc;

use async_trait::async_trait;

use aoprism_core::error::Result;
use aoprism_core::protocol::{decode_ic, encode_ms, resolve_pairing, Packet, PoseState, SelfRef};

use crate::app_state::AppState;
use crate::context::ClientCtx;
use crate::dispatch::CommandHandler;
use crate::realtime::Outgoing;

/// Longest accepted IC text, in characters.
pub const MAX_IC_TEXT_CHARS: usize = 256;

/// Per-recipient delivery budget for a broadcast `MS`.
pub const MS_PUBLISH_TIMEOUT_MS: u64 = 1500;

#[derive(Default)]
pub struct IcService;

impl IcService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for IcService {
    fn commands(&self) -> &'static [&'static str] {
        &["MS"]
    }

    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        let msg = match decode_ic(&packet.args) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(client = client.client_id, argc = packet.args.len(), error = %e, "MS dropped");
                app.metrics().decode_failures.inc(&[("reason", e.reason())]);
                return Ok(());
            }
        };
        app.metrics().ic_decoded.inc(&[("dialect", msg.dialect.as_str())]);
        client.dialect = Some(msg.dialect);

        let Some(area) = client.area else {
            tracing::debug!(client = client.client_id, "MS outside of an area");
            return Ok(());
        };
        if client.is_spectator() {
            tracing::debug!(client = client.client_id, "MS from spectator");
            return Ok(());
        }
        if msg.cid != client.char_id {
            tracing::debug!(client = client.client_id, cid = msg.cid, char_id = client.char_id, "MS with foreign cid");
            return Ok(());
        }
        if msg.text.chars().count() > MAX_IC_TEXT_CHARS {
            tracing::debug!(client = client.client_id, "MS text too long");
            return Ok(());
        }

        let rt = app.realtime();
        let me = SelfRef {
            client_id: client.client_id,
            char_id: client.char_id,
        };
        let candidates = rt.candidates_in(area, client.client_id);
        let pairing = resolve_pairing(&msg, me, &candidates);
        tracing::trace!(
            client = client.client_id,
            area,
            dialect = msg.dialect.as_str(),
            pair = %pairing.charid_pair,
            third = pairing.third_charid,
            "MS resolved"
        );

        let out = encode_ms(&msg, &pairing);
        if msg.commits_pose() {
            rt.sessions
                .publish_pose(client.client_id, Arc::new(PoseState::from_message(&msg)));
        }
        let out = Outgoing::reliable(out, MS_PUBLISH_TIMEOUT_MS).from_client(client.client_id);
        rt.publish_area(area, out).await;
        Ok(())
    }
}
