//! The error-report collaborator used by the resolution passes.

use mexp_ir::{Name, Span};

/// Receives resolution failures without halting the pass that found them.
///
/// Implementations accumulate; the passes keep walking after every call.
pub trait ErrorSink {
    /// `name` was bound twice in a scope that requires unique names.
    fn duplicate_definition(&mut self, name: &Name, span: Span);

    /// `name` was used with no visible binding.
    fn undefined_identifier(&mut self, name: &Name, span: Span);
}
