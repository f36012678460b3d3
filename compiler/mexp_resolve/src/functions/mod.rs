//! Function table: one flat name → declaration table for the whole program.
//!
//! Runs in two sub-passes so that calls may target functions declared later
//! in the program (including mutual recursion):
//!
//! 1. **Collect**: register every declaration in order. A name already
//!    registered is a duplicate definition; the duplicate is dropped.
//! 2. **Validate**: walk every expression (top-level assignments, accepted
//!    function bodies and return expressions, the `print` expression) and
//!    report each call whose callee is not registered. Bodies of dropped
//!    duplicates are not walked.
//!
//! Argument counts are not compared against parameter counts here.

use mexp_diagnostic::ErrorSink;
use mexp_ir::{Expr, ExprKind, FunctionDecl, Program, ScopeTable, Stmt};

/// Output of the function table pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionTable<'a> {
    declarations: ScopeTable<&'a FunctionDecl>,
}

impl<'a> FunctionTable<'a> {
    /// The declaration registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&'a FunctionDecl> {
        self.declarations.lookup(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Check whether `decl` is the declaration registered for its name
    /// (and not a dropped duplicate).
    pub fn is_registered(&self, decl: &FunctionDecl) -> bool {
        self.lookup(&decl.name)
            .is_some_and(|registered| std::ptr::eq(registered, decl))
    }
}

/// Run the function table pass over `program`.
///
/// Always completes; failures go to `sink`.
pub fn build_function_table<'a, S: ErrorSink>(
    program: &'a Program,
    sink: &mut S,
) -> FunctionTable<'a> {
    let table = collect(program, sink);
    validate(program, &table, sink);

    tracing::debug!(functions = table.len(), "function table built");
    table
}

fn collect<'a, S: ErrorSink>(program: &'a Program, sink: &mut S) -> FunctionTable<'a> {
    let mut declarations = ScopeTable::empty();
    for decl in program.functions() {
        match declarations.try_insert(decl.name.clone(), decl) {
            Ok(extended) => declarations = extended,
            Err(dup) => sink.duplicate_definition(&dup.name, decl.span),
        }
    }
    FunctionTable { declarations }
}

fn validate<S: ErrorSink>(program: &Program, table: &FunctionTable<'_>, sink: &mut S) {
    let mut checker = CallChecker { table, sink };

    for stmt in &program.statements {
        match stmt {
            Stmt::Assign(assign) => checker.check_expr(&assign.value),
            Stmt::Function(decl) => {
                if table.is_registered(decl) {
                    for assign in &decl.body {
                        checker.check_expr(&assign.value);
                    }
                    checker.check_expr(&decl.return_expr);
                } else {
                    tracing::trace!(function = %decl.name, "skipping duplicate declaration body");
                }
            }
        }
    }
    checker.check_expr(&program.print.exp);
}

struct CallChecker<'t, 'a, S> {
    table: &'t FunctionTable<'a>,
    sink: &'t mut S,
}

impl<S: ErrorSink> CallChecker<'_, '_, S> {
    fn check_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntegerLiteral(_) | ExprKind::Identifier(_) => {}
            ExprKind::LessThan(left, right)
            | ExprKind::Plus(left, right)
            | ExprKind::Minus(left, right)
            | ExprKind::Times(left, right) => {
                self.check_expr(left);
                self.check_expr(right);
            }
            ExprKind::Not(operand) => self.check_expr(operand),
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_expr(cond);
                self.check_expr(then_branch);
                self.check_expr(else_branch);
            }
            ExprKind::Call { callee, args } => {
                if !self.table.contains(callee) {
                    self.sink.undefined_identifier(callee, expr.span);
                }
                for arg in args {
                    self.check_expr(arg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
