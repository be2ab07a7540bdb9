//! Diagnostic Port
//!
//! User-facing notices that are not errors. The only one today is the
//! rejection of a configuration file that uses `exit()` or `eval()`.

use std::sync::Mutex;

/// Trait for receiving diagnostics
///
/// Implementations:
/// - StderrDiagnostics: one line per notice on stderr
/// - NoopDiagnostics: silent operation
/// - RecordingDiagnostics: keeps notices in memory
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// No-op sink for silent operation
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {
    fn emit(&self, _message: &str) {}
}

/// Sink that keeps every notice, in order
#[derive(Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn emit(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
