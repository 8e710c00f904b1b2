use std::sync::Arc;
use std::time::Instant;

use aoprism_core::error::{AoError, Result};
use aoprism_core::protocol::Packet;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::app_state::AppState;
use crate::context::ClientCtx;

/// Handler for one or more wire commands.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command names this handler answers to.
    fn commands(&self) -> &'static [&'static str];
    async fn handle(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()>;
}

/// Command name -> handler table.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, handler: Arc<dyn CommandHandler>) {
        for &cmd in handler.commands() {
            if self.handlers.insert(cmd, Arc::clone(&handler)).is_some() {
                tracing::warn!(cmd = %cmd, "command handler replaced");
            }
        }
    }

    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut cmds: Vec<&'static str> = self.handlers.iter().map(|e| *e.key()).collect();
        cmds.sort_unstable();
        cmds
    }

    /// Route a packet to its handler and record latency and failures.
    pub async fn dispatch(&self, app: &AppState, client: &mut ClientCtx, packet: Packet) -> Result<()> {
        let found = self
            .handlers
            .get(packet.command.as_str())
            .map(|e| (*e.key(), Arc::clone(e.value())));
        let Some((cmd, handler)) = found else {
            app.metrics().unknown_commands.inc(&[]);
            return Err(AoError::BadRequest(format!("unknown command: {}", packet.command)));
        };

        let started = Instant::now();
        let res = handler.handle(app, client, packet).await;
        app.metrics().dispatch_duration.observe(&[("cmd", cmd)], started.elapsed());

        if let Err(e) = &res {
            app.metrics()
                .handler_errors
                .inc(&[("cmd", cmd), ("code", e.client_code().as_str())]);
        }
        res
    }
}
