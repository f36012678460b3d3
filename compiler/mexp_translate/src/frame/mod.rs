//! Activation records.
//!
//! Translation is target-independent: it asks a [`FrameFactory`] for frames
//! and a [`Frame`] for storage. [`StackFrameFactory`] is the reference
//! implementation that keeps every formal in memory.

mod stack;

use std::fmt;

use crate::ir::{BinOp, IrExp, IrStm, Label, NameGen, Temp};

pub use stack::{InvalidWordSize, StackFrame, StackFrameFactory, MAX_WORD_SIZE};

/// Where a formal or local lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// At this byte offset from the frame pointer.
    InFrame(i64),
    InReg(Temp),
}

impl Access {
    /// IR that reads (or, as a `MOVE` destination, writes) this location,
    /// given the frame pointer of the frame it belongs to.
    pub fn exp(&self, fp: IrExp) -> IrExp {
        match self {
            Access::InFrame(offset) => {
                IrExp::mem(IrExp::binop(BinOp::Plus, fp, IrExp::Const(*offset)))
            }
            Access::InReg(temp) => IrExp::Temp(*temp),
        }
    }
}

/// One function's activation record.
pub trait Frame: fmt::Debug {
    /// Entry label.
    fn label(&self) -> &Label;

    /// Accesses for the formals, in declaration order.
    fn formals(&self) -> &[Access];

    fn formal(&self, index: usize) -> Option<&Access> {
        self.formals().get(index)
    }

    /// Reserve storage for a new local.
    ///
    /// `escapes` forces the local into memory.
    fn alloc_local(&mut self, escapes: bool, names: &mut NameGen) -> Access;

    /// Frame pointer.
    fn fp(&self) -> IrExp;

    /// Return-value location.
    fn rv(&self) -> IrExp;

    /// Wrap a translated body with the target's entry/exit bookkeeping.
    fn proc_entry_exit1(&self, body: IrStm) -> IrStm;
}

/// Creates frames for one target.
pub trait FrameFactory {
    type Frame: Frame;

    fn new_frame(&self, label: Label, formal_count: usize, names: &mut NameGen) -> Self::Frame;
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
