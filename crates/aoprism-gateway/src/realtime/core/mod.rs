//! Realtime core components for the gateway runtime.
//!
//! Session registry, area presence, and the egress runtime shared across
//! command handlers.

mod presence;
mod realtime;
mod session_registry;

pub use presence::Presence;
pub use realtime::RealtimeCore;
pub use session_registry::{ClientEntry, Connection, SessionRegistry};
