//! Framer behavior on chunked and hostile input.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aoprism_core::protocol::framer::{Framer, DEFAULT_MAX_BUFFER_BYTES};

#[test]
fn one_chunk_two_messages_in_order() {
    let mut f = Framer::new();
    let out = f.feed(b"A#1#%B#2#%");
    assert_eq!(out.messages, vec!["A#1", "B#2"]);
    assert_eq!(out.overflowed, None);
    assert_eq!(f.buffered(), 0);
}

#[test]
fn terminator_split_across_chunks() {
    let mut f = Framer::new();
    assert!(f.feed(b"A#1#").messages.is_empty());
    let out = f.feed(b"%B#2#%");
    assert_eq!(out.messages, vec!["A#1", "B#2"]);
}

#[test]
fn partial_tail_is_held_back() {
    let mut f = Framer::new();
    let out = f.feed(b"CH#1#%MS#chat");
    assert_eq!(out.messages, vec!["CH#1"]);
    assert_eq!(f.buffered(), "MS#chat".len());
    assert_eq!(f.feed(b"#%").messages, vec!["MS#chat"]);
}

#[test]
fn empty_feed_is_a_noop() {
    let mut f = Framer::new();
    f.feed(b"HI#abc");
    let out = f.feed(b"");
    assert!(out.messages.is_empty());
    assert_eq!(out.overflowed, None);
    assert_eq!(f.buffered(), 6);
}

#[test]
fn nul_bytes_are_stripped_before_framing() {
    let mut f = Framer::new();
    let out = f.feed(b"\0HI#a\0bc#\0%");
    assert_eq!(out.messages, vec!["HI#abc"]);
}

#[test]
fn invalid_utf8_is_dropped_not_fatal() {
    let mut f = Framer::new();
    let out = f.feed(b"CT#n\xffame#h\xc3\xa9llo#%");
    assert_eq!(out.messages, vec!["CT#name#h\u{e9}llo"]);
}

#[test]
fn multibyte_char_split_across_reads_survives() {
    let mut f = Framer::new();
    assert!(f.feed(b"CT#h\xc3").messages.is_empty());
    assert_eq!(f.feed(b"\xa9#%").messages, vec!["CT#h\u{e9}"]);
}

#[test]
fn overflow_clears_buffer_and_reports() {
    let mut f = Framer::with_max_buffer(16);
    let out = f.feed(&[b'x'; 17]);
    assert!(out.messages.is_empty());
    assert_eq!(out.overflowed, Some(17));
    assert_eq!(f.buffered(), 0);

    // the framer keeps working afterwards
    assert_eq!(f.feed(b"CH#0#%").messages, vec!["CH#0"]);
}

#[test]
fn complete_messages_survive_an_overflowing_tail() {
    let mut f = Framer::with_max_buffer(8);
    let mut chunk = b"CH#0#%".to_vec();
    chunk.extend_from_slice(&[b'y'; 9]);
    let out = f.feed(&chunk);
    assert_eq!(out.messages, vec!["CH#0"]);
    assert_eq!(out.overflowed, Some(9));
}

#[test]
fn buffer_at_exactly_the_cap_is_kept() {
    let mut f = Framer::new();
    let out = f.feed(&vec![b'z'; DEFAULT_MAX_BUFFER_BYTES]);
    assert_eq!(out.overflowed, None);
    assert_eq!(f.buffered(), DEFAULT_MAX_BUFFER_BYTES);
}

#[test]
fn bare_terminator_yields_empty_message() {
    let mut f = Framer::new();
    assert_eq!(f.feed(b"#%").messages, vec![""]);
}
