use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ServerConfig;
use crate::hub::Hub;
use crate::signaling::{OriginPolicy, ws_handler};

#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<Hub>,
    pub policy: Arc<OriginPolicy>,
    pub shutdown: CancellationToken,
    started_at: Instant,
}

/// Builds the HTTP surface: `/healthz` plus the `/ws` signaling endpoint.
/// Cancelling `shutdown` closes every connected client.
pub fn router(config: &ServerConfig, shutdown: CancellationToken) -> Router {
    let state = AppState {
        hub: Arc::new(Hub::new()),
        policy: Arc::new(OriginPolicy::new(&config.allowed_origins)),
        shutdown,
        started_at: Instant::now(),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: String,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("healthz responded");
    Json(HealthResponse {
        status: "ok",
        uptime: format!("{}s", state.started_at.elapsed().as_secs()),
    })
}
