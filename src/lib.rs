//! Readiness/liveness probes plus freeze, unfreeze and crash controls
//! for exercising an orchestrator's health checks.

pub mod config;
pub mod server;
