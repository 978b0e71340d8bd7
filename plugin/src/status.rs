//! Narrow progress-reporting interface.
//!
//! Deploy and release surface incremental progress through this trait only;
//! how it is rendered (terminal UI, logs, RPC stream) is the host's concern.

use std::sync::Mutex;

/// Receives progress updates during a deploy or release operation.
pub trait StatusReporter: Send + Sync {
    /// An in-progress step changed, e.g. "Monitoring evaluation ...".
    fn update(&self, message: &str);

    /// A step finished successfully.
    fn ok(&self, message: &str);

    /// A non-fatal condition worth the operator's attention.
    fn warn(&self, message: &str);
}

/// Reporter that forwards progress to the structured log.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn update(&self, message: &str) {
        tracing::info!(status = "update", "{message}");
    }

    fn ok(&self, message: &str) {
        tracing::info!(status = "ok", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(status = "warn", "{message}");
    }
}

/// Reporter that records every message, for asserting on progress in tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(StatusKind, String)>>,
}

/// Kind of a recorded status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Update,
    Ok,
    Warn,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in order.
    pub fn events(&self) -> Vec<(StatusKind, String)> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of the given kind, in order.
    pub fn messages(&self, kind: StatusKind) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl StatusReporter for RecordingReporter {
    fn update(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((StatusKind::Update, message.to_string()));
    }

    fn ok(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((StatusKind::Ok, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((StatusKind::Warn, message.to_string()));
    }
}
