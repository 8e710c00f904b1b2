//! Shared application state for the aoPrism gateway.
//!
//! Wires config, the realtime core, the command dispatcher and metrics, and
//! registers the built-in command handlers. Startup problems are returned as
//! `Result` instead of panicking.

use std::sync::Arc;

use aoprism_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::realtime::RealtimeCore;
use crate::services::{CharacterService, HandshakeService, IcService, MusicService, OocService};

/// Version string reported in `ID`.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    realtime: Arc<RealtimeCore>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state from a validated config.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let realtime = Arc::new(RealtimeCore::new());
        let dispatcher = Dispatcher::new();

        dispatcher.register(Arc::new(HandshakeService::new()));
        dispatcher.register(Arc::new(CharacterService::new()));
        dispatcher.register(Arc::new(IcService::new()));
        dispatcher.register(Arc::new(OocService::new()));
        dispatcher.register(Arc::new(MusicService::new()));

        // MC resolves area names before tracks, so a shadowed track is unplayable.
        for track in &cfg.music {
            if cfg.area_index(track).is_some() {
                tracing::warn!(track = %track, "music entry shadowed by an area of the same name");
            }
        }

        tracing::debug!(commands = ?dispatcher.registered_commands(), "command handlers registered");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            realtime,
            dispatcher: Arc::new(dispatcher),
            metrics: Arc::new(GatewayMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn realtime(&self) -> Arc<RealtimeCore> {
        Arc::clone(&self.realtime)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    /// Connected clients, counted for `PN` and the player cap.
    pub fn player_count(&self) -> usize {
        self.realtime.sessions.len()
    }

    /// Extra lines for `/metrics` that are read, not counted.
    pub fn metrics_extra(&self) -> Vec<(String, u64)> {
        let mut extra = vec![("aoprism_players".to_string(), self.player_count() as u64)];
        for (i, area) in self.cfg().areas.iter().enumerate() {
            let n = self.realtime.presence.count_in(i) as u64;
            extra.push((format!("aoprism_area_players{{area=\"{}\"}}", area.name.replace('"', "")), n));
        }
        extra
    }
}
