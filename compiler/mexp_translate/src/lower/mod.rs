//! Source tree → Tree IR fragments.
//!
//! The program's top-level statements and `print` become the body of a
//! procedure labelled [`MAIN_LABEL`]. Each function declaration becomes its
//! own procedure labelled by [`function_label`]. Top-level assignments of an
//! integer literal become data fragments instead of frame slots.
//!
//! # Lowering Rules
//!
//! | Source | IR |
//! |--------|----|
//! | integer literal | `CONST n` |
//! | identifier | constant `MEM(NAME l)` or frame access |
//! | `a < b` | `ESEQ(SEQ(MOVE(t, 0), CMOVE(LT, a, b, t, 1)), t)` |
//! | `a + b`, `a - b`, `a * b` | `BINOP` |
//! | `!a` | `BINOP(MINUS, 1, a)` |
//! | `c ? a : b` | `CJUMP` diamond writing one temp |
//! | `f(args)` | `CALL(fn.f, args)` |
//! | `print e` | `EXP(CALL(print, e))` |

mod context;
mod expr;
mod shape;

use mexp_ir::{Assign, Expr, FunctionDecl, ScopeTable, Stmt};
use mexp_resolve::{FunctionTable, Resolved};

use self::context::FnCtx;
use self::shape::TrExp;
use crate::error::TranslateError;
use crate::frame::{Frame, FrameFactory};
use crate::fragment::{DataFragment, Fragment, Fragments, ProcFragment};
use crate::ir::{IrExp, IrStm, Label, NameGen};

/// Label of the program's entry procedure.
pub const MAIN_LABEL: &str = "main";

/// Label of the runtime's print routine.
pub const PRINT_LABEL: &str = "print";

/// Prefix of every user function's label.
pub const FUNCTION_LABEL_PREFIX: &str = "fn.";

/// Entry label of the user function `name`.
pub fn function_label(name: &str) -> Label {
    Label::named(format!("{FUNCTION_LABEL_PREFIX}{name}"))
}

/// Translate a resolved program into fragments.
///
/// Fragments appear in emission order: each function and data fragment as
/// its declaration is reached, then `main` last.
pub fn translate_program<FF: FrameFactory>(
    resolved: &Resolved<'_>,
    factory: &FF,
    names: &mut NameGen,
) -> Result<Fragments<FF::Frame>, TranslateError> {
    let program = resolved.program();
    tracing::debug!(
        globals = resolved.symbols().globals.len(),
        functions = resolved.functions().len(),
        "translating program"
    );
    let mut translator = Translator {
        factory,
        functions: resolved.functions(),
        names,
        fragments: Fragments::new(),
    };

    let frame = factory.new_frame(Label::named(MAIN_LABEL), 0, translator.names);
    let mut ctx = FnCtx::program(frame);

    let mut body = Vec::with_capacity(program.statements.len() + 1);
    for stmt in &program.statements {
        let translated = match stmt {
            Stmt::Assign(assign) => translator.translate_assign(&mut ctx, assign)?,
            Stmt::Function(decl) => translator.translate_function(&ctx, decl)?,
        };
        body.push(translated.un_nx());
    }

    let print = translator.translate_print(&ctx, &program.print.exp)?;
    body.push(print.un_nx());

    let frame = ctx.into_frame();
    let body = frame.proc_entry_exit1(IrStm::seq_all(body));
    translator.emit(Fragment::Proc(ProcFragment { frame, body }));

    tracing::debug!(
        fragments = translator.fragments.len(),
        temps = translator.names.temps_issued(),
        "program translated"
    );
    Ok(translator.fragments)
}

struct Translator<'t, 'a, FF: FrameFactory> {
    factory: &'t FF,
    functions: &'t FunctionTable<'a>,
    names: &'t mut NameGen,
    fragments: Fragments<FF::Frame>,
}

impl<FF: FrameFactory> Translator<'_, '_, FF> {
    fn emit(&mut self, fragment: Fragment<FF::Frame>) {
        match &fragment {
            Fragment::Proc(procedure) => {
                tracing::trace!(label = %procedure.frame.label(), "emit proc fragment");
            }
            Fragment::Data(data) => {
                tracing::trace!(label = %data.label, values = ?data.values, "emit data fragment");
            }
        }
        self.fragments.push(fragment);
    }

    /// `name = value`.
    ///
    /// At top level an integer literal goes to a data fragment and the
    /// statement itself is a `NOP`. Anything else gets a fresh,
    /// non-escaping local. The value is translated before the name is
    /// rebound, so it still sees the previous binding.
    fn translate_assign(
        &mut self,
        ctx: &mut FnCtx<FF::Frame>,
        assign: &Assign,
    ) -> Result<TrExp, TranslateError> {
        if !ctx.in_function() {
            if let Some(value) = assign.value.as_integer_literal() {
                let label = self.names.fresh_label();
                let constant = IrExp::mem(IrExp::name(label.clone()));
                self.emit(Fragment::Data(DataFragment {
                    label,
                    values: vec![value],
                }));
                ctx.bind_constant(assign.name.clone(), constant);
                return Ok(TrExp::Nx(IrStm::Nop));
            }
        }

        let value = self.translate_expr(ctx, &assign.value)?.un_ex()?;
        let access = ctx.frame.alloc_local(false, self.names);
        let dst = access.exp(ctx.frame.fp());
        ctx.bind_local(assign.name.clone(), access);

        Ok(TrExp::Nx(IrStm::mov(dst, value)))
    }

    /// A function declaration: emits a procedure fragment, yields `NOP`.
    ///
    /// The callee's environment is its formals layered over the caller's.
    /// The caller's context is only read.
    fn translate_function(
        &mut self,
        caller: &FnCtx<FF::Frame>,
        decl: &FunctionDecl,
    ) -> Result<TrExp, TranslateError> {
        let label = function_label(&decl.name);
        tracing::debug!(function = %decl.name, %label, "translating function");

        let frame = self
            .factory
            .new_frame(label, decl.params.len(), self.names);

        let mut formals = ScopeTable::empty();
        for (index, param) in decl.params.iter().enumerate() {
            let access = frame
                .formal(index)
                .cloned()
                .ok_or_else(|| TranslateError::MissingFormal {
                    function: decl.name.clone(),
                    index,
                })?;
            formals = formals.insert(param.name.clone(), access);
        }

        let mut ctx = FnCtx::function(frame, formals.merge(caller.env()));

        let mut body = Vec::with_capacity(decl.body.len() + 1);
        for assign in &decl.body {
            body.push(self.translate_assign(&mut ctx, assign)?.un_nx());
        }
        let result = self.translate_expr(&ctx, &decl.return_expr)?.un_ex()?;
        body.push(IrStm::mov(ctx.frame.rv(), result));

        let frame = ctx.into_frame();
        let body = frame.proc_entry_exit1(IrStm::seq_all(body));
        self.emit(Fragment::Proc(ProcFragment { frame, body }));

        Ok(TrExp::Nx(IrStm::Nop))
    }

    /// `print exp`: a call to the runtime print routine.
    fn translate_print(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        exp: &Expr,
    ) -> Result<TrExp, TranslateError> {
        let arg = self.translate_expr(ctx, exp)?.un_ex()?;
        Ok(TrExp::Ex(IrExp::call(
            Label::named(PRINT_LABEL),
            vec![arg],
        )))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
