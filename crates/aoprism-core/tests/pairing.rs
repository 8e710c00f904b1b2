//! Pair resolution: mutuality, collocation, tie-breaks and the outbound layout.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use aoprism_core::protocol::ic::IcMessage;
use aoprism_core::protocol::outbound::{encode_ms, MS_OUT_ARGS};
use aoprism_core::protocol::pairing::{resolve_pairing, Candidate, PairingInfo, PoseState, SelfRef};
use aoprism_core::protocol::schema::Dialect;

const ME: SelfRef = SelfRef { client_id: 1, char_id: 5 };

fn message(charid_pair: i64, third_charid: i64) -> IcMessage {
    let mut m = IcMessage::empty(Dialect::AoGolden);
    m.msg_type = "chat".into();
    m.folder = "Phoenix".into();
    m.anim = "normal".into();
    m.pos = "def".into();
    m.cid = ME.char_id;
    m.charid_pair = charid_pair;
    m.third_charid = third_charid;
    m
}

fn candidate(client_id: u64, char_id: i64, pair_target: i64, pos: &str) -> Candidate {
    Candidate {
        client_id,
        char_id,
        pose: Arc::new(PoseState {
            folder: format!("Folder{char_id}"),
            anim: "pointing".into(),
            pre: "-".into(),
            flip: 1,
            offset: "-20".into(),
            pos: pos.into(),
            pair_target,
            third_target: -1,
        }),
    }
}

#[test]
fn mutual_collocated_pair_is_confirmed() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let info = resolve_pairing(&message(3, -1), ME, &cands);

    let c = info.primary.expect("confirmed");
    assert_eq!(c.char_id, 3);
    assert_eq!(c.folder, "Folder3");
    assert_eq!(c.anim, "pointing");
    assert_eq!(c.offset, "-20");
    assert_eq!(c.flip, 1);
    assert_eq!(info.charid_pair, "3");
    assert!(info.third.is_none());
    assert_eq!(info.third_charid, -1);
}

#[test]
fn different_position_is_unconfirmed() {
    let cands = [candidate(2, 3, ME.char_id, "pro")];
    let info = resolve_pairing(&message(3, -1), ME, &cands);
    assert_eq!(info, PairingInfo::unpaired());
}

#[test]
fn one_sided_declaration_is_unconfirmed() {
    let cands = [candidate(2, 3, 9, "def")];
    let info = resolve_pairing(&message(3, -1), ME, &cands);
    assert!(info.primary.is_none());
    assert_eq!(info.charid_pair, "-1");
}

#[test]
fn partner_may_point_back_through_its_third_slot() {
    let mut c = candidate(2, 3, -1, "def");
    Arc::make_mut(&mut c.pose).third_target = ME.char_id;
    let info = resolve_pairing(&message(3, -1), ME, &[c]);
    assert!(info.primary.is_some());
}

#[test]
fn sentinel_target_forces_minus_one() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let mut m = message(-1, -1);
    m.pair_order = Some("1".into());
    let info = resolve_pairing(&m, ME, &cands);
    assert_eq!(info.charid_pair, "-1");
    assert!(info.primary.is_none());
}

#[test]
fn pair_order_is_appended_when_confirmed() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let mut m = message(3, -1);
    m.pair_order = Some("1".into());
    assert_eq!(resolve_pairing(&m, ME, &cands).charid_pair, "3^1");
}

#[test]
fn self_is_never_a_candidate() {
    let cands = [candidate(ME.client_id, ME.char_id, ME.char_id, "def")];
    let info = resolve_pairing(&message(ME.char_id, -1), ME, &cands);
    assert!(info.primary.is_none());
}

#[test]
fn first_eligible_candidate_wins() {
    let cands = [
        candidate(2, 3, 9, "def"),
        candidate(3, 3, ME.char_id, "def"),
        candidate(4, 3, ME.char_id, "def"),
    ];
    let info = resolve_pairing(&message(3, -1), ME, &cands);
    assert_eq!(info.primary.unwrap().client_id, 3);
}

#[test]
fn third_pair_resolves_independently() {
    let mut third = candidate(3, 4, -1, "def");
    Arc::make_mut(&mut third.pose).third_target = ME.char_id;
    let cands = [candidate(2, 3, ME.char_id, "def"), third];

    let info = resolve_pairing(&message(3, 4), ME, &cands);
    assert_eq!(info.primary.unwrap().char_id, 3);
    assert_eq!(info.third.unwrap().char_id, 4);
    assert_eq!(info.third_charid, 4);
}

#[test]
fn same_partner_cannot_fill_both_slots() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let info = resolve_pairing(&message(3, 3), ME, &cands);
    assert!(info.primary.is_some());
    assert!(info.third.is_none());
    assert_eq!(info.third_charid, -1);
}

#[test]
fn spectator_sender_never_pairs() {
    let spectator = SelfRef { client_id: 1, char_id: -1 };
    let cands = [candidate(2, 3, -1, "def")];
    let info = resolve_pairing(&message(3, -1), spectator, &cands);
    assert_eq!(info, PairingInfo::unpaired());
}

#[test]
fn resolver_leaves_candidate_poses_untouched() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let before = (*cands[0].pose).clone();
    let _ = resolve_pairing(&message(3, -1), ME, &cands);
    assert_eq!(*cands[0].pose, before);
}

#[test]
fn pose_from_message_records_declared_pairs() {
    let mut m = message(3, 4);
    m.offset_pair = "10&5".into();
    let pose = PoseState::from_message(&m);
    assert_eq!(pose.folder, "Phoenix");
    assert_eq!(pose.pos, "def");
    assert_eq!(pose.offset, "10&5");
    assert_eq!(pose.pair_target, 3);
    assert_eq!(pose.third_target, 4);
    assert_eq!(PoseState::idle("Edgeworth").pair_target, -1);
}

#[test]
fn outbound_layout_carries_companion_pose() {
    let cands = [candidate(2, 3, ME.char_id, "def")];
    let mut m = message(3, -1);
    m.pair_order = Some("0".into());
    m.video = "clip.webm".into();
    let info = resolve_pairing(&m, ME, &cands);
    let p = encode_ms(&m, &info);

    assert_eq!(p.command, "MS");
    assert_eq!(p.args.len(), MS_OUT_ARGS);
    assert_eq!(p.args[2], "Phoenix");
    assert_eq!(p.args[16], "3^0");
    assert_eq!(p.args[17], "Folder3");
    assert_eq!(p.args[18], "pointing");
    assert_eq!(p.args[20], "-20");
    assert_eq!(p.args[21], "1");
    assert_eq!(p.args[30], "-1");
    assert_eq!(p.args[31], "");
    assert_eq!(p.args[35], "clip.webm");
}

#[test]
fn outbound_unpaired_fields_are_blank() {
    let m = message(-1, -1);
    let p = encode_ms(&m, &PairingInfo::unpaired());
    assert_eq!(p.args[16], "-1");
    assert_eq!(p.args[17], "");
    assert_eq!(p.args[18], "");
    assert_eq!(p.args[19], "0");
    assert_eq!(p.args[20], "0");
    assert_eq!(p.args[21], "0");
    assert!(p.to_wire().ends_with("#%"));
}
