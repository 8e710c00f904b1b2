//! aoPrism server binary.
//!
//! Usage: `aoprism-gateway [config.yaml]` (defaults to `aoprism.yaml`).
//! Log verbosity follows `RUST_LOG`.

use std::net::SocketAddr;

use aoprism_core::error::{AoError, Result};
use tracing_subscriber::{fmt, EnvFilter};

use aoprism_gateway::{app_state::AppState, config, router, transport};

const DEFAULT_CONFIG: &str = "aoprism.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = config::load_from_file(&path)?;
    let tcp_addr = parse_addr("server.tcp_listen", &cfg.server.tcp_listen)?;
    let ws_addr = parse_addr("server.ws_listen", &cfg.server.ws_listen)?;

    let state = AppState::new(cfg)?;

    let tcp = tokio::net::TcpListener::bind(tcp_addr)
        .await
        .map_err(|e| AoError::Internal(format!("bind {tcp_addr}: {e}")))?;
    let ws = tokio::net::TcpListener::bind(ws_addr)
        .await
        .map_err(|e| AoError::Internal(format!("bind {ws_addr}: {e}")))?;

    tracing::info!(
        name = %state.cfg().server.name,
        %tcp_addr,
        %ws_addr,
        version = aoprism_gateway::app_state::SERVER_VERSION,
        "aoprism starting"
    );

    let app = router::build_router(state.clone());
    let ws_server = axum::serve(ws, app.into_make_service_with_connect_info::<SocketAddr>());

    tokio::select! {
        _ = transport::tcp::serve_tcp(tcp, state) => {}
        res = ws_server => {
            res.map_err(|e| AoError::Internal(format!("websocket listener: {e}")))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
    }
    Ok(())
}

fn parse_addr(key: &str, raw: &str) -> Result<SocketAddr> {
    raw.parse()
        .map_err(|_| AoError::BadRequest(format!("{key} must be a socket address, got {raw:?}")))
}
