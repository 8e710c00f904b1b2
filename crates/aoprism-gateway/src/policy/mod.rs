//! Policy layer (flood control).
//!
//! Per-connection limits applied to framed messages before dispatch.

pub mod flood;

pub use flood::{ConnRateLimiter, FloodDecision};
