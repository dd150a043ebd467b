//! Probe and control endpoints for orchestrator health checks
//!
//! - `GET /ready` - Readiness: 200 unless frozen, then 503
//! - `GET /live` - Liveness: always 200 while the process runs
//! - `POST /freeze` - Force readiness to fail
//! - `POST /unfreeze` - Restore readiness
//! - `POST /crash` - Exit with code 1, skipping graceful shutdown

use super::shutdown::ShutdownSignal;
use super::state::FreezeState;
use super::terminate::{ProcessExit, Terminator, CRASH_EXIT_CODE};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// JSON body returned by every endpoint: `{"status":"..."}`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub const OK: Self = Self { status: "ok" };
    pub const ALIVE: Self = Self { status: "alive" };
    pub const FROZEN: Self = Self { status: "frozen" };
    pub const UNFROZEN: Self = Self { status: "unfrozen" };
}

type StatusResponse = (StatusCode, Json<StatusBody>);

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    freeze: FreezeState,
    terminator: Arc<dyn Terminator>,
}

impl AppState {
    /// Server state whose `/crash` really exits the process
    pub fn new(freeze: FreezeState) -> Self {
        Self::with_terminator(freeze, Arc::new(ProcessExit))
    }

    pub fn with_terminator(freeze: FreezeState, terminator: Arc<dyn Terminator>) -> Self {
        Self { freeze, terminator }
    }
}

/// Readiness probe handler
async fn ready(State(state): State<AppState>) -> StatusResponse {
    let frozen = state.freeze.is_frozen();
    debug!(frozen, "Readiness probe");
    if frozen {
        (StatusCode::SERVICE_UNAVAILABLE, Json(StatusBody::FROZEN))
    } else {
        (StatusCode::OK, Json(StatusBody::OK))
    }
}

/// Liveness probe handler
///
/// Always 200 - if this responds, the process is alive.
async fn live() -> StatusResponse {
    debug!("Liveness probe");
    (StatusCode::OK, Json(StatusBody::ALIVE))
}

async fn freeze(State(state): State<AppState>) -> StatusResponse {
    state.freeze.freeze();
    info!("Frozen, readiness probe now failing");
    (StatusCode::OK, Json(StatusBody::FROZEN))
}

async fn unfreeze(State(state): State<AppState>) -> StatusResponse {
    state.freeze.unfreeze();
    info!("Unfrozen, readiness probe restored");
    (StatusCode::OK, Json(StatusBody::UNFROZEN))
}

/// Crash handler
///
/// With `ProcessExit` this never returns and the caller sees the connection
/// drop. The 202 is only observable with a non-exiting terminator.
async fn crash(State(state): State<AppState>) -> StatusCode {
    warn!(code = CRASH_EXIT_CODE, "Crash requested, terminating process");
    state.terminator.terminate(CRASH_EXIT_CODE);
    StatusCode::ACCEPTED
}

/// Build the router for probe and control endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/live", get(live))
        .route("/freeze", post(freeze))
        .route("/unfreeze", post(unfreeze))
        .route("/crash", post(crash))
        .with_state(state)
}

/// Serve the endpoints on an already-bound listener
///
/// Returns once `shutdown` fires and in-flight requests have completed.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
}

/// Bind `addr` and run the probe server until shutdown
pub async fn run_probe_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(addr = %listener.local_addr()?, "Probe server listening (HTTP)");

    serve(listener, state, shutdown).await
}
