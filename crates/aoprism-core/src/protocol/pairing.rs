//! Pair resolution for IC messages.
//!
//! A pair is confirmed only when it is mutual and collocated: the partner
//! declared the sender back (as primary or third pair) and stands at the same
//! position. The resolver is a pure function over a snapshot supplied by the
//! caller; it never touches live client state.

use std::sync::Arc;

use crate::protocol::ic::IcMessage;

/// What a client last showed on screen, plus the pairs it declared.
///
/// Published as a whole `Arc<PoseState>` and never edited in place, so readers
/// on other tasks always see one consistent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseState {
    /// Folder the client claimed in its last IC message.
    pub folder: String,
    pub anim: String,
    pub pre: String,
    pub flip: i64,
    pub offset: String,
    pub pos: String,
    pub pair_target: i64,
    pub third_target: i64,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            folder: String::new(),
            anim: String::new(),
            pre: String::new(),
            flip: 0,
            offset: "0".to_string(),
            pos: String::new(),
            pair_target: -1,
            third_target: -1,
        }
    }
}

impl PoseState {
    /// Pose of a freshly selected character that has not spoken yet.
    pub fn idle(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }

    pub fn from_message(msg: &IcMessage) -> Self {
        Self {
            folder: msg.folder.clone(),
            anim: msg.anim.clone(),
            pre: msg.pre.clone(),
            flip: msg.flip,
            offset: msg.offset_pair.clone(),
            pos: msg.pos.clone(),
            pair_target: msg.charid_pair,
            third_target: msg.third_charid,
        }
    }
}

/// The sender of the message being resolved.
#[derive(Debug, Clone, Copy)]
pub struct SelfRef {
    pub client_id: u64,
    pub char_id: i64,
}

/// One other client in the sender's area at snapshot time.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub client_id: u64,
    pub char_id: i64,
    pub pose: Arc<PoseState>,
}

/// Partner pose copied into the outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Companion {
    pub client_id: u64,
    pub char_id: i64,
    pub folder: String,
    pub anim: String,
    pub offset: String,
    pub flip: i64,
}

impl Companion {
    fn of(c: &Candidate) -> Self {
        Self {
            client_id: c.client_id,
            char_id: c.char_id,
            folder: c.pose.folder.clone(),
            anim: c.pose.anim.clone(),
            offset: c.pose.offset.clone(),
            flip: c.pose.flip,
        }
    }
}

/// Outcome of [`resolve_pairing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingInfo {
    pub primary: Option<Companion>,
    pub third: Option<Companion>,
    /// Outbound `charid_pair`: `-1`, `<id>` or `<id>^<order>`.
    pub charid_pair: String,
    /// Outbound `third_charid`: the partner id or `-1`.
    pub third_charid: i64,
}

impl PairingInfo {
    pub fn unpaired() -> Self {
        Self {
            primary: None,
            third: None,
            charid_pair: "-1".to_string(),
            third_charid: -1,
        }
    }
}

/// Resolve both pair slots of `msg` against `candidates`.
///
/// Candidates are scanned in the given order and the first eligible one wins,
/// so callers should pass them sorted by client id.
pub fn resolve_pairing(msg: &IcMessage, me: SelfRef, candidates: &[Candidate]) -> PairingInfo {
    if me.char_id < 0 {
        return PairingInfo::unpaired();
    }

    let primary = find_companion(msg.charid_pair, me, &msg.pos, candidates);
    // the same partner cannot fill both slots
    let third = if msg.third_charid == msg.charid_pair {
        None
    } else {
        find_companion(msg.third_charid, me, &msg.pos, candidates)
    };

    let charid_pair = match (&primary, &msg.pair_order) {
        (Some(c), Some(order)) => format!("{}^{}", c.char_id, order),
        (Some(c), None) => c.char_id.to_string(),
        (None, _) => "-1".to_string(),
    };
    let third_charid = third.as_ref().map_or(-1, |c| c.char_id);

    PairingInfo {
        primary,
        third,
        charid_pair,
        third_charid,
    }
}

fn find_companion(
    target: i64,
    me: SelfRef,
    pos: &str,
    candidates: &[Candidate],
) -> Option<Companion> {
    if target <= -1 {
        return None;
    }
    candidates
        .iter()
        .find(|c| {
            c.client_id != me.client_id
                && c.char_id == target
                && (c.pose.pair_target == me.char_id || c.pose.third_target == me.char_id)
                && c.pose.pos == pos
        })
        .map(Companion::of)
}
