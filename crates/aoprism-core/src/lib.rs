//! aoPrism core: transport-agnostic AO protocol primitives and error types.
//!
//! This crate owns the parts of the server that never touch a socket: the
//! `#%` framer, packet splitting and escaping, the IC (`MS`) dialect table and
//! decoder, the pairing resolver and the outbound `MS` encoder. It carries no
//! runtime dependencies so every piece is a plain synchronous function.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Hostile or foreign traffic surfaces as typed failures (`DecodeError`,
//! `Framed::overflowed`) so a single client can never bring the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{AoError, DecodeError, Result};
