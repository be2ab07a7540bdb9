//! Diagnostic sink writing to stderr

use crate::domain::ports::DiagnosticSink;

/// Writes each notice as one line on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn emit(&self, message: &str) {
        eprintln!("{}", message);
    }
}
