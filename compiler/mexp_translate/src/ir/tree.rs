//! Tree IR node types.
//!
//! Two sorts: [`IrExp`] computes a value, [`IrStm`] performs effects and
//! control flow. [`IrExp::ESeq`] embeds statements in an expression.
//!
//! Operands are evaluated left to right. `CMOVE` is the one conditional
//! data-move; it never branches.

use std::fmt;

use super::temp::{Label, Temp};

/// Arithmetic operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Plus,
    Minus,
    Mul,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Plus => "PLUS",
            BinOp::Minus => "MINUS",
            BinOp::Mul => "MUL",
        }
    }
}

/// Relational operator of a `CJUMP` or `CMOVE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Eq => "EQ",
            RelOp::Ne => "NE",
            RelOp::Lt => "LT",
            RelOp::Le => "LE",
            RelOp::Gt => "GT",
            RelOp::Ge => "GE",
        }
    }
}

/// Value-producing IR node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrExp {
    Const(i64),
    /// Address of a label.
    Name(Label),
    Temp(Temp),
    BinOp {
        op: BinOp,
        left: Box<IrExp>,
        right: Box<IrExp>,
    },
    /// Word-sized memory contents at the address.
    Mem(Box<IrExp>),
    Call {
        func: Label,
        args: Vec<IrExp>,
    },
    /// Run `stm` for effect, then evaluate `exp`.
    ESeq {
        stm: Box<IrStm>,
        exp: Box<IrExp>,
    },
}

/// Effect / control-flow IR node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrStm {
    /// `dst` must be a `TEMP` or `MEM`.
    Move { dst: IrExp, src: IrExp },
    /// Evaluate and discard.
    Exp(IrExp),
    Jump(Label),
    CJump {
        op: RelOp,
        left: IrExp,
        right: IrExp,
        if_true: Label,
        if_false: Label,
    },
    /// `if left op right { dst = src }`, without a branch.
    CMove {
        op: RelOp,
        left: IrExp,
        right: IrExp,
        dst: IrExp,
        src: IrExp,
    },
    Seq(Box<IrStm>, Box<IrStm>),
    Label(Label),
    Nop,
}

// ── Builders ────────────────────────────────────────────────────────

impl IrExp {
    pub fn temp(temp: Temp) -> Self {
        IrExp::Temp(temp)
    }

    pub fn name(label: Label) -> Self {
        IrExp::Name(label)
    }

    pub fn mem(addr: IrExp) -> Self {
        IrExp::Mem(Box::new(addr))
    }

    pub fn binop(op: BinOp, left: IrExp, right: IrExp) -> Self {
        IrExp::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(func: Label, args: Vec<IrExp>) -> Self {
        IrExp::Call { func, args }
    }

    pub fn eseq(stm: IrStm, exp: IrExp) -> Self {
        IrExp::ESeq {
            stm: Box::new(stm),
            exp: Box::new(exp),
        }
    }

    /// Evaluating this node has no effect besides producing its value.
    pub fn is_pure(&self) -> bool {
        match self {
            IrExp::Const(_) | IrExp::Name(_) | IrExp::Temp(_) => true,
            IrExp::BinOp { left, right, .. } => left.is_pure() && right.is_pure(),
            IrExp::Mem(addr) => addr.is_pure(),
            IrExp::Call { .. } | IrExp::ESeq { .. } => false,
        }
    }
}

impl IrStm {
    pub fn mov(dst: IrExp, src: IrExp) -> Self {
        IrStm::Move { dst, src }
    }

    pub fn cjump(op: RelOp, left: IrExp, right: IrExp, if_true: Label, if_false: Label) -> Self {
        IrStm::CJump {
            op,
            left,
            right,
            if_true,
            if_false,
        }
    }

    pub fn cmove(op: RelOp, left: IrExp, right: IrExp, dst: IrExp, src: IrExp) -> Self {
        IrStm::CMove {
            op,
            left,
            right,
            dst,
            src,
        }
    }

    /// Sequence two statements. A `NOP` on either side is dropped.
    pub fn seq(first: IrStm, second: IrStm) -> Self {
        match (first, second) {
            (IrStm::Nop, stm) | (stm, IrStm::Nop) => stm,
            (first, second) => IrStm::Seq(Box::new(first), Box::new(second)),
        }
    }

    /// Sequence any number of statements, right-nested. Empty input is `NOP`.
    pub fn seq_all(stms: impl IntoIterator<Item = IrStm>) -> Self {
        let stms: Vec<IrStm> = stms.into_iter().collect();
        stms.into_iter()
            .rev()
            .fold(IrStm::Nop, |rest, stm| IrStm::seq(stm, rest))
    }

    /// The non-`SEQ` statements of this tree in execution order.
    pub fn linearize(&self) -> Vec<&IrStm> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(stm) = stack.pop() {
            if let IrStm::Seq(first, second) = stm {
                stack.push(second);
                stack.push(first);
            } else {
                out.push(stm);
            }
        }
        out
    }
}

// ── Traversal ───────────────────────────────────────────────────────

/// A borrowed IR node of either sort.
#[derive(Copy, Clone, Debug)]
pub enum IrNode<'a> {
    Exp(&'a IrExp),
    Stm(&'a IrStm),
}

impl IrExp {
    /// Visit this node and every descendant in pre-order.
    pub fn walk<'a, F: FnMut(IrNode<'a>)>(&'a self, visit: &mut F) {
        visit(IrNode::Exp(self));
        match self {
            IrExp::Const(_) | IrExp::Name(_) | IrExp::Temp(_) => {}
            IrExp::BinOp { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            IrExp::Mem(addr) => addr.walk(visit),
            IrExp::Call { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
            IrExp::ESeq { stm, exp } => {
                stm.walk(visit);
                exp.walk(visit);
            }
        }
    }
}

impl IrStm {
    /// Visit this node and every descendant in pre-order.
    pub fn walk<'a, F: FnMut(IrNode<'a>)>(&'a self, visit: &mut F) {
        visit(IrNode::Stm(self));
        match self {
            IrStm::Move { dst, src } => {
                dst.walk(visit);
                src.walk(visit);
            }
            IrStm::Exp(exp) => exp.walk(visit),
            IrStm::Jump(_) | IrStm::Label(_) | IrStm::Nop => {}
            IrStm::CJump { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            IrStm::CMove {
                left,
                right,
                dst,
                src,
                ..
            } => {
                left.walk(visit);
                right.walk(visit);
                dst.walk(visit);
                src.walk(visit);
            }
            IrStm::Seq(first, second) => {
                first.walk(visit);
                second.walk(visit);
            }
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl fmt::Display for IrExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrExp::Const(value) => write!(f, "CONST {value}"),
            IrExp::Name(label) => write!(f, "NAME {label}"),
            IrExp::Temp(temp) => write!(f, "TEMP {temp}"),
            IrExp::BinOp { op, left, right } => {
                write!(f, "BINOP({}, {left}, {right})", op.as_str())
            }
            IrExp::Mem(addr) => write!(f, "MEM({addr})"),
            IrExp::Call { func, args } => {
                write!(f, "CALL({func}")?;
                for arg in args {
                    write!(f, ", {arg}")?;
                }
                f.write_str(")")
            }
            IrExp::ESeq { stm, exp } => write!(f, "ESEQ({stm}, {exp})"),
        }
    }
}

impl fmt::Display for IrStm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrStm::Move { dst, src } => write!(f, "MOVE({dst}, {src})"),
            IrStm::Exp(exp) => write!(f, "EXP({exp})"),
            IrStm::Jump(label) => write!(f, "JUMP {label}"),
            IrStm::CJump {
                op,
                left,
                right,
                if_true,
                if_false,
            } => write!(
                f,
                "CJUMP({}, {left}, {right}, {if_true}, {if_false})",
                op.as_str()
            ),
            IrStm::CMove {
                op,
                left,
                right,
                dst,
                src,
            } => write!(f, "CMOVE({}, {left}, {right}, {dst}, {src})", op.as_str()),
            IrStm::Seq(first, second) => write!(f, "SEQ({first}, {second})"),
            IrStm::Label(label) => write!(f, "LABEL {label}"),
            IrStm::Nop => f.write_str("NOP"),
        }
    }
}
