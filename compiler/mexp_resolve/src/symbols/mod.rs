//! Symbol resolution: variable bindings per lexical scope.
//!
//! Builds one table for the program scope and one independent table per
//! function body, and reports every identifier that has no binding in the
//! scope it is used in.
//!
//! # Scoping Rules
//!
//! - Statements are visited in order, then the `print` expression.
//! - `name = value` resolves `value` first, then binds `name`, so
//!   `x = x + 1` with no earlier `x` reports `x` as undefined.
//! - Reassigning a name is a rebinding and is not reported.
//! - A function body starts from a fresh scope holding only its parameters;
//!   top-level bindings are not visible inside it and nothing bound inside it
//!   leaks out. Duplicate parameter names are reported.
//! - Call targets are checked by the function table pass, not here.

use mexp_diagnostic::ErrorSink;
use mexp_ir::{Assign, Expr, ExprKind, FunctionDecl, Name, Program, ScopeTable, Span, Stmt, Type};

/// Bindings of one function body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionScope {
    pub name: Name,
    pub span: Span,
    /// Parameters (with their declared types) plus body locals (`Unknown`).
    pub scope: ScopeTable<Type>,
}

/// Output of the symbol resolution pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    /// Every top-level assigned name, bound to `Type::Unknown`.
    pub globals: ScopeTable<Type>,
    /// One scope per function declaration, in declaration order.
    pub functions: Vec<FunctionScope>,
}

impl SymbolTable {
    /// Scope of the first function declared as `name`.
    pub fn function_scope(&self, name: &str) -> Option<&ScopeTable<Type>> {
        self.functions
            .iter()
            .find(|f| f.name.as_str() == name)
            .map(|f| &f.scope)
    }
}

/// Run the symbol resolution pass over `program`.
///
/// Always completes; failures go to `sink`.
pub fn build_symbol_table<S: ErrorSink>(program: &Program, sink: &mut S) -> SymbolTable {
    let mut resolver = SymbolResolver {
        sink,
        functions: Vec::new(),
    };

    let mut globals = ScopeTable::empty();
    for stmt in &program.statements {
        match stmt {
            Stmt::Assign(assign) => globals = resolver.resolve_assign(globals, assign),
            Stmt::Function(decl) => resolver.resolve_function(decl),
        }
    }
    resolver.resolve_expr(&globals, &program.print.exp);

    tracing::debug!(
        globals = globals.len(),
        functions = resolver.functions.len(),
        "symbol table built"
    );

    SymbolTable {
        globals,
        functions: resolver.functions,
    }
}

struct SymbolResolver<'s, S> {
    sink: &'s mut S,
    functions: Vec<FunctionScope>,
}

impl<S: ErrorSink> SymbolResolver<'_, S> {
    fn resolve_assign(&mut self, scope: ScopeTable<Type>, assign: &Assign) -> ScopeTable<Type> {
        self.resolve_expr(&scope, &assign.value);
        if scope.contains(&assign.name) {
            tracing::trace!(name = %assign.name, "rebinding");
            return scope;
        }
        scope.insert(assign.name.clone(), Type::Unknown)
    }

    fn resolve_function(&mut self, decl: &FunctionDecl) {
        let mut scope = ScopeTable::empty();
        for param in &decl.params {
            match scope.try_insert(param.name.clone(), param.ty) {
                Ok(extended) => scope = extended,
                Err(dup) => self.sink.duplicate_definition(&dup.name, param.span),
            }
        }

        for assign in &decl.body {
            scope = self.resolve_assign(scope, assign);
        }
        self.resolve_expr(&scope, &decl.return_expr);

        tracing::trace!(function = %decl.name, bindings = scope.len(), "function scope built");
        self.functions.push(FunctionScope {
            name: decl.name.clone(),
            span: decl.span,
            scope,
        });
    }

    fn resolve_expr(&mut self, scope: &ScopeTable<Type>, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntegerLiteral(_) => {}
            ExprKind::Identifier(name) => {
                if !scope.contains(name) {
                    self.sink.undefined_identifier(name, expr.span);
                }
            }
            ExprKind::LessThan(left, right)
            | ExprKind::Plus(left, right)
            | ExprKind::Minus(left, right)
            | ExprKind::Times(left, right) => {
                self.resolve_expr(scope, left);
                self.resolve_expr(scope, right);
            }
            ExprKind::Not(operand) => self.resolve_expr(scope, operand),
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(scope, cond);
                self.resolve_expr(scope, then_branch);
                self.resolve_expr(scope, else_branch);
            }
            ExprKind::Call { args, .. } => {
                for arg in args {
                    self.resolve_expr(scope, arg);
                }
            }
        }
    }
}
