//! Process termination abstraction for the crash route
//!
//! Production code uses `ProcessExit`, which ends the process on the spot.
//! Tests use `RecordingTerminator` to observe the requested exit code
//! without killing the test harness.

/// Exit code reported when `/crash` kills the process
pub const CRASH_EXIT_CODE: i32 = 1;

/// Trait for terminating the current process
///
/// Injected via `AppState` so the crash route can be exercised in-process.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Production terminator
///
/// Skips destructors, the tokio runtime teardown and graceful shutdown.
#[derive(Debug, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code)
    }
}

/// Terminator that records exit codes instead of exiting
#[cfg(test)]
#[allow(clippy::expect_used)]
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    codes: std::sync::Mutex<Vec<i32>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl RecordingTerminator {
    pub fn codes(&self) -> Vec<i32> {
        self.codes
            .lock()
            .expect("RecordingTerminator lock poisoned")
            .clone()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Terminator for RecordingTerminator {
    fn terminate(&self, code: i32) {
        self.codes
            .lock()
            .expect("RecordingTerminator lock poisoned")
            .push(code);
    }
}
