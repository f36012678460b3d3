//! Translated-expression shapes and the conversions between them.

use crate::error::TranslateError;
use crate::ir::{IrExp, IrStm, Label, RelOp};

/// IR encoding of `true`. `false` is `CONST 0`.
pub(crate) const TRUE: i64 = 1;

/// A translated source construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TrExp {
    /// Produces a value.
    Ex(IrExp),
    /// Effect only.
    Nx(IrStm),
}

impl TrExp {
    /// As a value. Effect-only translations have none.
    pub(crate) fn un_ex(self) -> Result<IrExp, TranslateError> {
        match self {
            TrExp::Ex(exp) => Ok(exp),
            TrExp::Nx(_) => Err(TranslateError::EffectAsValue),
        }
    }

    /// As an effect. A pure value is dropped entirely.
    pub(crate) fn un_nx(self) -> IrStm {
        match self {
            TrExp::Ex(exp) if exp.is_pure() => IrStm::Nop,
            TrExp::Ex(exp) => IrStm::Exp(exp),
            TrExp::Nx(stm) => stm,
        }
    }

    /// As a branch to `if_true` when the value is true, else `if_false`.
    pub(crate) fn un_cx(self, if_true: Label, if_false: Label) -> Result<IrStm, TranslateError> {
        let exp = self.un_ex()?;
        Ok(IrStm::cjump(
            RelOp::Eq,
            exp,
            IrExp::Const(TRUE),
            if_true,
            if_false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ir::Temp;

    #[test]
    fn effect_has_no_value() {
        assert_eq!(
            TrExp::Nx(IrStm::Nop).un_ex(),
            Err(TranslateError::EffectAsValue)
        );
    }

    #[test]
    fn value_as_effect() {
        let call = IrExp::call(Label::named("print"), vec![IrExp::Const(1)]);
        assert_eq!(TrExp::Ex(call.clone()).un_nx(), IrStm::Exp(call));
        assert_eq!(TrExp::Ex(IrExp::Const(3)).un_nx(), IrStm::Nop);
    }

    #[test]
    fn value_as_condition() {
        let t = IrExp::Temp(Temp::new(4));
        let stm = TrExp::Ex(t.clone()).un_cx(Label::named("T"), Label::named("F"));
        assert_eq!(
            stm,
            Ok(IrStm::cjump(
                RelOp::Eq,
                t,
                IrExp::Const(1),
                Label::named("T"),
                Label::named("F"),
            ))
        );
    }
}
