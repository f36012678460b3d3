//! Name and function resolution for mexp programs.
//!
//! Two independent passes over the source tree:
//!
//! - [`build_symbol_table`]: variable bindings per lexical scope, reporting
//!   undefined identifiers and duplicate parameters.
//! - [`build_function_table`]: one flat function table, reporting duplicate
//!   function names and calls to undefined functions.
//!
//! Both report through an [`ErrorSink`](mexp_diagnostic::ErrorSink) and never
//! stop early. [`resolve_program`] runs both and hands out a [`Resolved`]
//! only when neither found an error; translation takes a `&Resolved`, so it
//! cannot run on a program with resolution errors.
//!
//! # Pipeline Position
//!
//! ```text
//! Parser (external) → **Resolve** → Translate → backend (external)
//! ```

mod functions;
mod symbols;

use mexp_diagnostic::{DiagnosticQueue, ErrorGuaranteed};
use mexp_ir::Program;

pub use functions::{build_function_table, FunctionTable};
pub use symbols::{build_symbol_table, FunctionScope, SymbolTable};

/// A program that passed both resolution passes with zero errors.
#[derive(Clone, Debug)]
pub struct Resolved<'a> {
    program: &'a Program,
    symbols: SymbolTable,
    functions: FunctionTable<'a>,
}

impl<'a> Resolved<'a> {
    /// The resolved program.
    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn functions(&self) -> &FunctionTable<'a> {
        &self.functions
    }
}

/// Run both resolution passes, reporting into `queue`.
///
/// Returns `Err` if either pass reported an error. Errors already in the
/// queue before the call do not count.
pub fn resolve_program<'a>(
    program: &'a Program,
    queue: &mut DiagnosticQueue,
) -> Result<Resolved<'a>, ErrorGuaranteed> {
    let before = queue.error_count();

    let symbols = build_symbol_table(program, queue);
    let functions = build_function_table(program, queue);

    if let Some(guarantee) = queue.errors_since(before) {
        tracing::debug!(errors = queue.error_count() - before, "resolution failed");
        return Err(guarantee);
    }

    Ok(Resolved {
        program,
        symbols,
        functions,
    })
}

#[cfg(test)]
mod tests;
