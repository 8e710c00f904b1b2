//! Realtime runtime (egress engine) for the aoPrism gateway.
//!
//! Session registry (connections, char ids, published poses), area presence,
//! and QoS-based publish helpers.

pub mod core;
pub mod types;

pub use core::{ClientEntry, Connection, Presence, RealtimeCore, SessionRegistry};
pub use types::{Outgoing, QoS};
