//! Expression lowering.

use mexp_ir::{Expr, ExprKind, Name, NodeList, Span};

use super::context::FnCtx;
use super::shape::{TrExp, TRUE};
use super::{function_label, Translator};
use crate::error::TranslateError;
use crate::frame::FrameFactory;
use crate::ir::{BinOp, IrExp, IrStm, RelOp};

impl<FF: FrameFactory> Translator<'_, '_, FF> {
    pub(super) fn translate_expr(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        expr: &Expr,
    ) -> Result<TrExp, TranslateError> {
        match &expr.kind {
            ExprKind::IntegerLiteral(value) => Ok(TrExp::Ex(IrExp::Const(*value))),
            ExprKind::Identifier(name) => Self::translate_ident(ctx, name, expr.span),
            ExprKind::LessThan(left, right) => self.translate_less_than(ctx, left, right),
            ExprKind::Plus(left, right) => self.translate_binop(ctx, BinOp::Plus, left, right),
            ExprKind::Minus(left, right) => self.translate_binop(ctx, BinOp::Minus, left, right),
            ExprKind::Times(left, right) => self.translate_binop(ctx, BinOp::Mul, left, right),
            ExprKind::Not(operand) => {
                let value = self.translate_expr(ctx, operand)?.un_ex()?;
                Ok(TrExp::Ex(IrExp::binop(
                    BinOp::Minus,
                    IrExp::Const(TRUE),
                    value,
                )))
            }
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => self.translate_conditional(ctx, cond, then_branch, else_branch),
            ExprKind::Call { callee, args } => self.translate_call(ctx, callee, args, expr.span),
        }
    }

    fn translate_ident(
        ctx: &FnCtx<FF::Frame>,
        name: &Name,
        span: Span,
    ) -> Result<TrExp, TranslateError> {
        ctx.lookup(name)
            .map(TrExp::Ex)
            .ok_or_else(|| TranslateError::UnboundIdentifier {
                name: name.clone(),
                span,
            })
    }

    fn translate_binop(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        op: BinOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<TrExp, TranslateError> {
        let left = self.translate_expr(ctx, left)?.un_ex()?;
        let right = self.translate_expr(ctx, right)?.un_ex()?;
        Ok(TrExp::Ex(IrExp::binop(op, left, right)))
    }

    /// `ESEQ(SEQ(MOVE(t, 0), CMOVE(LT, l, r, t, 1)), t)`. No branch.
    fn translate_less_than(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        left: &Expr,
        right: &Expr,
    ) -> Result<TrExp, TranslateError> {
        let left = self.translate_expr(ctx, left)?.un_ex()?;
        let right = self.translate_expr(ctx, right)?.un_ex()?;
        let result = IrExp::temp(self.names.fresh_temp());

        let stm = IrStm::seq(
            IrStm::mov(result.clone(), IrExp::Const(0)),
            IrStm::cmove(
                RelOp::Lt,
                left,
                right,
                result.clone(),
                IrExp::Const(TRUE),
            ),
        );
        Ok(TrExp::Ex(IrExp::eseq(stm, result)))
    }

    /// ```text
    /// CJUMP(EQ, cond, 1, T, F)
    /// LABEL F;  MOVE(t, else);  JUMP E
    /// LABEL T;  MOVE(t, then)
    /// LABEL E
    /// ```
    /// yielding `t`.
    fn translate_conditional(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        cond: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> Result<TrExp, TranslateError> {
        let then_label = self.names.fresh_label();
        let else_label = self.names.fresh_label();
        let join_label = self.names.fresh_label();
        let result = IrExp::temp(self.names.fresh_temp());

        let guard = self
            .translate_expr(ctx, cond)?
            .un_cx(then_label.clone(), else_label.clone())?;
        let then_value = self.translate_expr(ctx, then_branch)?.un_ex()?;
        let else_value = self.translate_expr(ctx, else_branch)?.un_ex()?;

        let stm = IrStm::seq_all([
            guard,
            IrStm::Label(else_label),
            IrStm::mov(result.clone(), else_value),
            IrStm::Jump(join_label.clone()),
            IrStm::Label(then_label),
            IrStm::mov(result.clone(), then_value),
            IrStm::Label(join_label),
        ]);
        Ok(TrExp::Ex(IrExp::eseq(stm, result)))
    }

    fn translate_call(
        &mut self,
        ctx: &FnCtx<FF::Frame>,
        callee: &Name,
        args: &NodeList<Expr>,
        span: Span,
    ) -> Result<TrExp, TranslateError> {
        if !self.functions.contains(callee) {
            return Err(TranslateError::UnknownFunction {
                name: callee.clone(),
                span,
            });
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.translate_expr(ctx, arg)?.un_ex()?);
        }
        Ok(TrExp::Ex(IrExp::call(function_label(callee), values)))
    }
}
