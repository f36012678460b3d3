//! mexp compiler driver.
//!
//! Runs the middle-end over an already-parsed source tree:
//!
//! ```text
//! Program → resolve (symbols + functions) → gate on errors → translate → fragments
//! ```
//!
//! Translation only runs when resolution reported no errors, using the
//! reference [`StackFrameFactory`] layout.

use std::fmt;
use std::sync::Once;

use mexp_diagnostic::{internal_error, Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode};
use mexp_ir::Program;
use mexp_resolve::resolve_program;
use mexp_translate::{translate_program, Fragments, NameGen, StackFrame, StackFrameFactory};
use serde::Deserialize;

pub use mexp_translate::{InvalidWordSize, TranslateError};

/// Word size of the reference frame layout, in bytes.
pub const DEFAULT_WORD_SIZE: i64 = 8;

/// Knobs for one compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub diagnostics: DiagnosticConfig,
    pub word_size: i64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            diagnostics: DiagnosticConfig::default(),
            word_size: DEFAULT_WORD_SIZE,
        }
    }
}

/// Output of a successful compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compilation {
    pub fragments: Fragments<StackFrame>,
}

impl fmt::Display for Compilation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fragments, f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Rejected before resolution started.
    #[error(transparent)]
    WordSize(#[from] InvalidWordSize),

    /// Resolution reported errors; translation did not run. Holds every
    /// diagnostic, sorted by position.
    #[error("resolution failed with {count} error(s)", count = count_errors(.0))]
    Resolution(Vec<Diagnostic>),

    #[error(transparent)]
    Internal(#[from] TranslateError),
}

impl CompileError {
    /// The failure as reportable diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            CompileError::WordSize(err) => {
                vec![Diagnostic::error(ErrorCode::E0001).with_message(err.to_string())]
            }
            CompileError::Resolution(diagnostics) => diagnostics,
            CompileError::Internal(err) => vec![internal_error(err)],
        }
    }
}

fn count_errors(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Resolve and translate `program`.
pub fn compile(program: &Program, options: &CompileOptions) -> Result<Compilation, CompileError> {
    let word_size = StackFrameFactory::check_word_size(options.word_size)?;
    let mut queue = DiagnosticQueue::with_config(options.diagnostics.clone());

    let Ok(resolved) = resolve_program(program, &mut queue) else {
        let diagnostics = queue.flush();
        tracing::debug!(count = diagnostics.len(), "compilation stopped after resolution");
        return Err(CompileError::Resolution(diagnostics));
    };

    let mut names = NameGen::new();
    let factory = StackFrameFactory::new(word_size, &mut names)?;
    let fragments = translate_program(&resolved, &factory, &mut names)?;

    Ok(Compilation { fragments })
}

/// Parse a JSON-encoded source tree.
///
/// Nesting depth is unbounded: deep expressions grow the stack on demand
/// instead of hitting `serde_json`'s recursion limit.
pub fn parse_program(json: &str) -> Result<Program, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let program = Program::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(program)
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if `RUST_LOG` is set. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
