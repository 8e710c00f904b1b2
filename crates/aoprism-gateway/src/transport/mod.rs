//! Network transports.
//!
//! Raw TCP and WebSocket connections are adapted to the same byte-oriented
//! [`session::Session`] driver; only socket I/O differs between them.

pub mod session;
pub mod tcp;
pub mod ws;

pub use session::{Flow, Session};

/// How often a session loop checks its keepalive deadline.
pub const KEEPALIVE_CHECK_MS: u64 = 1000;
