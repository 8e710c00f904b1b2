//! Per-connection client context shared between the session driver and
//! command handlers.

pub mod client;

pub use client::{ClientCtx, TransportKind};
