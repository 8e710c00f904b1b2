//! aoPrism gateway library entry.
//!
//! Wires the TCP and WebSocket transports, flood policy, command dispatcher,
//! realtime core and built-in command handlers into one server. Consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod realtime;
pub mod router;
pub mod services;
pub mod transport;
