//! Diagnostic queue for collecting and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Sorting by source position on flush
//! - `ErrorGuaranteed` proof that errors were emitted
//! - [`ErrorSink`] implementation for the resolution passes

use mexp_ir::{Name, Span};

use crate::{
    duplicate_definition, undefined_identifier, Diagnostic, ErrorCode, ErrorGuaranteed, ErrorSink,
};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept before further errors are dropped
    /// (0 = unlimited).
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 10 }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Queue for collecting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// build_symbol_table(&program, &mut queue);
/// if queue.has_errors() { /* report, do not translate */ }
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    /// Collected diagnostics, in report order.
    diagnostics: Vec<Diagnostic>,
    /// Count of errors reported (including dropped ones).
    error_count: usize,
    /// Errors dropped because the limit was reached.
    dropped: usize,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            dropped: 0,
            config,
        }
    }

    /// Add a diagnostic to the queue.
    ///
    /// Returns `true` if the diagnostic was kept, `false` if it was dropped
    /// by the error limit. Dropped errors still count toward
    /// [`error_count`](Self::error_count).
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if !diag.is_error() {
            self.diagnostics.push(diag);
            return true;
        }

        let kept = self.error_count - self.dropped;
        self.error_count += 1;
        if self.config.error_limit > 0 && kept >= self.config.error_limit {
            self.dropped += 1;
            return false;
        }

        self.diagnostics.push(diag);
        true
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check whether any error has been reported.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Proof that errors were reported after `mark`, a value previously
    /// read from [`error_count`](Self::error_count).
    pub fn errors_since(&self, mark: usize) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count.saturating_sub(mark))
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Sort diagnostics by position and return them.
    ///
    /// Clears the queue. Diagnostics without a span sort last, and a
    /// "too many errors" note is appended when the limit dropped any.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        // Stable sort keeps report order for equal spans.
        self.diagnostics
            .sort_by_key(|d| d.primary_span().map_or((1, Span::DUMMY), |s| (0, s)));

        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        if self.dropped > 0 {
            result.push(too_many_errors(self.config.error_limit, self.dropped));
        }

        self.error_count = 0;
        self.dropped = 0;

        result
    }
}

impl ErrorSink for DiagnosticQueue {
    fn duplicate_definition(&mut self, name: &Name, span: Span) {
        self.add(duplicate_definition(span, name));
    }

    fn undefined_identifier(&mut self, name: &Name, span: Span) {
        self.add(undefined_identifier(span, name));
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
fn too_many_errors(limit: usize, dropped: usize) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E9002)
        .with_message(format!(
            "stopped reporting after {limit} errors ({dropped} more not shown)"
        ))
        .with_note("raise the error limit to see every error")
}
