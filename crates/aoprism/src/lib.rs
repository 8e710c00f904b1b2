//! Top-level facade crate for aoPrism.
//!
//! Re-exports the protocol core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use aoprism_core::*;
}

pub mod gateway {
    pub use aoprism_gateway::*;
}
