//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and handler trait so services can depend on
//! this module directly.

pub mod dispatcher;

pub use dispatcher::{CommandHandler, Dispatcher};
