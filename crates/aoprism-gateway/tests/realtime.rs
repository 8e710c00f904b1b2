#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use aoprism_core::protocol::{Packet, PoseState};
use aoprism_gateway::realtime::{Connection, Outgoing, RealtimeCore};
use tokio::sync::mpsc;

fn connect(rt: &RealtimeCore, cap: usize) -> (u64, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(cap);
    let id = rt.sessions.allocate_id();
    rt.sessions.insert(id, Connection { tx });
    (id, rx)
}

#[test]
fn ids_are_sequential_from_zero() {
    let rt = RealtimeCore::new();
    let (a, _ra) = connect(&rt, 1);
    let (b, _rb) = connect(&rt, 1);
    assert_eq!((a, b), (0, 1));
    rt.disconnect(a);
    let (c, _rc) = connect(&rt, 1);
    assert_eq!(c, 2);
}

#[test]
fn presence_moves_between_areas() {
    let rt = RealtimeCore::new();
    assert_eq!(rt.presence.join(0, 5), None);
    assert_eq!(rt.presence.join(0, 2), None);
    assert_eq!(rt.presence.clients_in(0), vec![2, 5]);

    assert_eq!(rt.presence.join(1, 5), Some(0));
    assert_eq!(rt.presence.clients_in(0), vec![2]);
    assert_eq!(rt.presence.area_of(5), Some(1));
    assert_eq!(rt.presence.count_in(1), 1);

    assert_eq!(rt.presence.leave(5), Some(1));
    assert_eq!(rt.presence.count_in(1), 0);
    assert_eq!(rt.presence.leave(5), None);
}

#[test]
fn candidates_are_ordered_and_exclude_sender() {
    let rt = RealtimeCore::new();
    let mut rxs = Vec::new();
    for _ in 0..3 {
        let (id, rx) = connect(&rt, 1);
        rt.presence.join(0, id);
        rt.sessions.set_character(id, id as i64, PoseState::idle("Folder"));
        rxs.push(rx);
    }

    let snap = rt.candidates_in(0, 1);
    let ids: Vec<u64> = snap.iter().map(|c| c.client_id).collect();
    assert_eq!(ids, [0, 2]);
    assert_eq!(snap[1].char_id, 2);
}

#[test]
fn snapshot_is_isolated_from_later_pose_updates() {
    let rt = RealtimeCore::new();
    let (a, _ra) = connect(&rt, 1);
    let (b, _rb) = connect(&rt, 1);
    rt.presence.join(0, a);
    rt.presence.join(0, b);

    let snap = rt.candidates_in(0, a);
    let next = PoseState {
        pos: "wit".into(),
        ..PoseState::idle("Other")
    };
    rt.sessions.publish_pose(b, Arc::new(next));

    assert_eq!(snap[0].pose.pos, "");
    assert_eq!(rt.sessions.pose(b).unwrap().pos, "wit");
}

#[test]
fn char_taken_ignores_self() {
    let rt = RealtimeCore::new();
    let (a, _ra) = connect(&rt, 1);
    rt.sessions.set_character(a, 3, PoseState::idle("X"));
    assert!(!rt.sessions.char_taken(&[a], 3, a));
    let (b, _rb) = connect(&rt, 1);
    assert!(rt.sessions.char_taken(&[a, b], 3, b));
}

#[tokio::test]
async fn lossy_publish_drops_when_queue_is_full() {
    let rt = RealtimeCore::new();
    let (a, mut ra) = connect(&rt, 1);
    rt.presence.join(0, a);

    rt.publish_area(0, Outgoing::lossy(Packet::new("CT").arg("1"))).await;
    rt.publish_area(0, Outgoing::lossy(Packet::new("CT").arg("2"))).await;
    assert_eq!(ra.try_recv().unwrap(), "CT#1#%");
    assert!(ra.try_recv().is_err());
}

#[tokio::test]
async fn reliable_publish_gives_up_after_timeout() {
    let rt = RealtimeCore::new();
    let (slow, mut r_slow) = connect(&rt, 1);
    let (fast, mut r_fast) = connect(&rt, 4);
    rt.presence.join(0, slow);
    rt.presence.join(0, fast);

    rt.publish_area(0, Outgoing::reliable(Packet::new("MS").arg("1"), 20)).await;
    rt.publish_area(0, Outgoing::reliable(Packet::new("MS").arg("2"), 20)).await;

    assert_eq!(r_slow.try_recv().unwrap(), "MS#1#%");
    assert!(r_slow.try_recv().is_err());
    assert_eq!(r_fast.try_recv().unwrap(), "MS#1#%");
    assert_eq!(r_fast.try_recv().unwrap(), "MS#2#%");
}

#[tokio::test]
async fn reliable_publish_never_waits_on_the_origin_queue() {
    let rt = RealtimeCore::new();
    let (origin, mut r_origin) = connect(&rt, 1);
    let (peer, mut r_peer) = connect(&rt, 4);
    rt.presence.join(0, origin);
    rt.presence.join(0, peer);

    // origin's queue is already full; a timeout of 0 would wait forever
    rt.publish_area(0, Outgoing::lossy(Packet::new("CT").arg("x"))).await;
    r_peer.try_recv().unwrap();

    let out = Outgoing::reliable(Packet::new("MS").arg("1"), 0).from_client(origin);
    tokio::time::timeout(Duration::from_millis(500), rt.publish_area(0, out))
        .await
        .expect("publish must not block on the origin");

    assert_eq!(r_origin.try_recv().unwrap(), "CT#x#%");
    assert!(r_origin.try_recv().is_err());
    assert_eq!(r_peer.try_recv().unwrap(), "MS#1#%");
}
