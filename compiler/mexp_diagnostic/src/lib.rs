//! Diagnostic system for resolution and translation errors.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//!
//! # Error Sink
//!
//! The resolution passes never abort on a user error. They report through the
//! [`ErrorSink`] trait and keep walking; [`DiagnosticQueue`] is the sink the
//! driver uses. Whether translation may run is decided afterwards from the
//! queue's error count.
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was emitted.
//!
//! ```text
//! // Can only get ErrorGuaranteed after reporting an error
//! let mark = queue.error_count();
//! queue.add(diagnostic);
//! let guarantee = queue.errors_since(mark);
//!
//! // Functions can return ErrorGuaranteed to prove they reported errors
//! fn resolve_program() -> Result<Resolved, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;
mod sink;

pub use diagnostic::{
    duplicate_definition, internal_error, undefined_identifier, Diagnostic, Label, Severity,
};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use sink::ErrorSink;
