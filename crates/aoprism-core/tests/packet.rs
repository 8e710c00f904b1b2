//! Packet splitting, serialization and escaping.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aoprism_core::protocol::packet::{escape, unescape, Packet};

#[test]
fn parse_splits_command_and_args() {
    let p = Packet::parse("MC#Trial.opus#3#Phoenix").unwrap();
    assert_eq!(p.command, "MC");
    assert_eq!(p.args, vec!["Trial.opus", "3", "Phoenix"]);
}

#[test]
fn parse_keeps_empty_trailing_argument() {
    let p = Packet::parse("CT#name#").unwrap();
    assert_eq!(p.args, vec!["name", ""]);
}

#[test]
fn parse_command_without_args() {
    let p = Packet::parse("askchaa").unwrap();
    assert_eq!(p.command, "askchaa");
    assert!(p.args.is_empty());
}

#[test]
fn parse_skips_leading_empty_segment() {
    let p = Packet::parse("#HI#abc").unwrap();
    assert_eq!(p.command, "HI");
    assert_eq!(p.args, vec!["abc"]);
}

#[test]
fn parse_rejects_missing_command() {
    assert!(Packet::parse("").is_none());
    assert!(Packet::parse("#").is_none());
    assert!(Packet::parse("  ").is_none());
}

#[test]
fn to_wire_appends_terminator() {
    assert_eq!(Packet::new("DONE").to_wire(), "DONE#%");
    assert_eq!(Packet::new("PN").arg(3).arg(100).to_wire(), "PN#3#100#%");
}

#[test]
fn text_args_are_escaped() {
    let p = Packet::new("CT").text("Judge#1").text("100% & $5");
    assert_eq!(p.to_wire(), "CT#Judge<num>1#100<percent> <and> <dollar>5#%");
}

#[test]
fn tuple_joins_escaped_members() {
    let p = Packet::new("LE").tuple(&["Badge", "Mine & yours", "badge.png"]);
    assert_eq!(p.args, vec!["Badge&Mine <and> yours&badge.png"]);
}

#[test]
fn unescape_reverses_escape() {
    let raw = "a#b%c$d&e";
    assert_eq!(escape(raw), "a<num>b<percent>c<dollar>d<and>e");
    assert_eq!(unescape(&escape(raw)), raw);
    assert_eq!(unescape("no tokens here"), "no tokens here");
}
