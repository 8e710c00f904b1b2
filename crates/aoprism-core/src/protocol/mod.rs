//! AO wire protocol modules.
//!
//! Inbound pipeline: bytes -> [`framer`] -> [`packet`] -> [`ic`] decode (using
//! the [`schema`] table) -> [`pairing`] -> [`outbound`] encode.
//!
//! All parsers are panic-free: malformed input is reported as a typed value
//! instead of panicking or indexing raw buffers, keeping the server resilient
//! to hostile traffic.

pub mod framer;
pub mod ic;
pub mod outbound;
pub mod packet;
pub mod pairing;
pub mod schema;

pub use framer::{Framed, Framer};
pub use outbound::encode_ms;
pub use ic::{decode_ic, IcMessage};
pub use packet::{escape, unescape, Packet};
pub use pairing::{resolve_pairing, Candidate, Companion, PairingInfo, PoseState, SelfRef};
pub use schema::{Dialect, Field, FieldKind};
