//! Built-in command handlers.

mod character;
mod handshake;
mod ic;
mod music;
mod ooc;

pub use character::CharacterService;
pub use handshake::HandshakeService;
pub use ic::{IcService, MAX_IC_TEXT_CHARS, MS_PUBLISH_TIMEOUT_MS};
pub use music::MusicService;
pub use ooc::OocService;
