//! HTTP server for probe and control endpoints
//!
//! Provides Kubernetes-style health probes:
//! - `/live` - Liveness probe (process is running)
//! - `/ready` - Readiness probe (fails while frozen)
//!
//! plus the chaos controls `/freeze`, `/unfreeze` and `/crash`, and
//! graceful shutdown handling for SIGTERM/SIGINT.

mod health;
pub mod shutdown;
mod state;
pub mod terminate;

pub use health::{build_router, run_probe_server, serve, AppState, StatusBody};
pub use shutdown::{shutdown_channel, wait_for_signal, ShutdownController, ShutdownSignal};
pub use state::FreezeState;
pub use terminate::{ProcessExit, Terminator, CRASH_EXIT_CODE};

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
