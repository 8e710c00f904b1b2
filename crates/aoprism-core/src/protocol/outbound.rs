//! Outbound `MS` encoding.
//!
//! Every recipient gets one canonical layout: the 30 fields of the 2.8
//! broadcast (base, showname, resolved pair and companion pose, 2.8 effects)
//! followed by the third-pair block and the video field. Clients read the
//! prefix they understand. Text arrives from the sender already in wire form
//! and is forwarded untouched.

use crate::protocol::ic::IcMessage;
use crate::protocol::packet::Packet;
use crate::protocol::pairing::{Companion, PairingInfo};

/// Number of arguments in an outbound `MS`.
pub const MS_OUT_ARGS: usize = 36;

/// Build the broadcast `MS` for a decoded message and its resolved pairs.
pub fn encode_ms(msg: &IcMessage, pairing: &PairingInfo) -> Packet {
    let (other_folder, other_emote, other_offset, other_flip) = companion_fields(&pairing.primary);
    let (third_folder, third_emote, third_offset, third_flip) = companion_fields(&pairing.third);

    Packet::new("MS")
        .arg(&msg.msg_type)
        .arg(&msg.pre)
        .arg(&msg.folder)
        .arg(&msg.anim)
        .arg(&msg.text)
        .arg(&msg.pos)
        .arg(&msg.sfx)
        .arg(msg.emote_mod)
        .arg(msg.cid)
        .arg(msg.sfx_delay)
        .arg(msg.button)
        .arg(msg.evidence)
        .arg(msg.flip)
        .arg(msg.ding)
        .arg(msg.color)
        .arg(&msg.showname)
        .arg(&pairing.charid_pair)
        .arg(other_folder)
        .arg(other_emote)
        .arg(&msg.offset_pair)
        .arg(other_offset)
        .arg(other_flip)
        .arg(msg.nonint_pre)
        .arg(&msg.sfx_looping)
        .arg(msg.screenshake)
        .arg(&msg.frames_shake)
        .arg(&msg.frames_realization)
        .arg(&msg.frames_sfx)
        .arg(msg.additive)
        .arg(&msg.effect)
        .arg(pairing.third_charid)
        .arg(third_folder)
        .arg(third_emote)
        .arg(third_offset)
        .arg(third_flip)
        .arg(&msg.video)
}

fn companion_fields(c: &Option<Companion>) -> (&str, &str, &str, i64) {
    match c {
        Some(c) => (c.folder.as_str(), c.anim.as_str(), c.offset.as_str(), c.flip),
        None => ("", "", "0", 0),
    }
}
