use std::collections::HashSet;

use aoprism_core::error::{AoError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub flood: FloodSection,

    /// Character folder names; the index is the char id.
    pub characters: Vec<String>,

    /// Track names. Entries without a file extension act as category headers.
    #[serde(default)]
    pub music: Vec<String>,

    pub areas: Vec<AreaConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AoError::UnsupportedVersion);
        }
        if self.characters.is_empty() {
            return Err(AoError::BadRequest("characters must not be empty".into()));
        }
        if self.characters.iter().any(|c| c.trim().is_empty()) {
            return Err(AoError::BadRequest("character names must not be blank".into()));
        }
        if self.areas.is_empty() {
            return Err(AoError::BadRequest("areas must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for a in &self.areas {
            if a.name.trim().is_empty() {
                return Err(AoError::BadRequest("area names must not be blank".into()));
            }
            if !seen.insert(a.name.as_str()) {
                return Err(AoError::BadRequest(format!("duplicate area name: {}", a.name)));
            }
        }

        self.server.validate()?;
        self.flood.validate()?;
        Ok(())
    }

    pub fn area_index(&self, name: &str) -> Option<usize> {
        self.areas.iter().position(|a| a.name == name)
    }

    pub fn character(&self, char_id: i64) -> Option<&str> {
        usize::try_from(char_id)
            .ok()
            .and_then(|i| self.characters.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_tcp_listen")]
    pub tcp_listen: String,

    #[serde(default = "default_ws_listen")]
    pub ws_listen: String,

    #[serde(default = "default_max_players")]
    pub max_players: usize,

    #[serde(default = "default_keepalive_timeout_ms")]
    pub keepalive_timeout_ms: u64,

    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,

    #[serde(default)]
    pub motd: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: String::new(),
            tcp_listen: default_tcp_listen(),
            ws_listen: default_ws_listen(),
            max_players: default_max_players(),
            keepalive_timeout_ms: default_keepalive_timeout_ms(),
            max_buffer_bytes: default_max_buffer_bytes(),
            motd: None,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.max_players == 0 {
            return Err(AoError::BadRequest("server.max_players must be at least 1".into()));
        }
        if !(10000..=600000).contains(&self.keepalive_timeout_ms) {
            return Err(AoError::BadRequest(
                "server.keepalive_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if !(256..=65536).contains(&self.max_buffer_bytes) {
            return Err(AoError::BadRequest(
                "server.max_buffer_bytes must be between 256 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_name() -> String {
    "aoPrism".into()
}
fn default_tcp_listen() -> String {
    "0.0.0.0:27016".into()
}
fn default_ws_listen() -> String {
    "0.0.0.0:27017".into()
}
fn default_max_players() -> usize {
    100
}
fn default_keepalive_timeout_ms() -> u64 {
    180000
}
fn default_max_buffer_bytes() -> usize {
    aoprism_core::protocol::framer::DEFAULT_MAX_BUFFER_BYTES
}

/// Per-connection inbound message budget.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloodSection {
    #[serde(default = "default_flood_rps")]
    pub rps: u32,
    #[serde(default = "default_flood_burst")]
    pub burst: u32,
}

impl Default for FloodSection {
    fn default() -> Self {
        Self {
            rps: default_flood_rps(),
            burst: default_flood_burst(),
        }
    }
}

impl FloodSection {
    pub fn validate(&self) -> Result<()> {
        if self.rps == 0 || self.burst == 0 {
            return Err(AoError::BadRequest("flood.rps and flood.burst must be positive".into()));
        }
        Ok(())
    }
}

fn default_flood_rps() -> u32 {
    10
}
fn default_flood_burst() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaConfig {
    pub name: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default)]
    pub evidence: Vec<EvidenceConfig>,
}

fn default_background() -> String {
    "default".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_evidence_image")]
    pub image: String,
}

fn default_evidence_image() -> String {
    "empty.png".into()
}
