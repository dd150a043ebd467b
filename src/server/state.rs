//! Freeze flag backing the readiness probe

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared freeze state
///
/// While frozen, the readiness probe reports 503 so the orchestrator
/// stops routing traffic to this process. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct FreezeState {
    frozen: Arc<AtomicBool>,
}

impl FreezeState {
    /// Create a new freeze state (initially not frozen)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::SeqCst);
    }

    pub fn unfreeze(&self) {
        self.frozen.store(false, Ordering::SeqCst);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }
}
