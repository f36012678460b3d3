//! Reference frame layout.
//!
//! ```text
//! fp + (i + 2) * word   formal i
//! fp + word             return address
//! fp + 0                saved frame pointer
//! fp - (k + 1) * word   k-th escaping local
//! ```
//!
//! Formals always live in memory. Non-escaping locals get a fresh temp.

use super::{Access, Frame, FrameFactory};
use crate::ir::{IrExp, IrStm, Label, NameGen, Temp};

/// Largest accepted word size, in bytes.
pub const MAX_WORD_SIZE: i64 = 1024;

/// A word size outside `1..=MAX_WORD_SIZE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("word size must be between 1 and {max} bytes, got {0}", max = MAX_WORD_SIZE)]
pub struct InvalidWordSize(pub i64);

/// Builds [`StackFrame`]s sharing one frame-pointer and one return-value
/// temp.
#[derive(Copy, Clone, Debug)]
pub struct StackFrameFactory {
    word_size: i64,
    fp: Temp,
    rv: Temp,
}

impl StackFrameFactory {
    /// Reserve the frame-pointer and return-value temps from `names`.
    ///
    /// No temps are drawn when `word_size` is rejected.
    pub fn new(word_size: i64, names: &mut NameGen) -> Result<Self, InvalidWordSize> {
        let word_size = Self::check_word_size(word_size)?;
        Ok(StackFrameFactory {
            word_size,
            fp: names.fresh_temp(),
            rv: names.fresh_temp(),
        })
    }

    pub fn check_word_size(word_size: i64) -> Result<i64, InvalidWordSize> {
        if (1..=MAX_WORD_SIZE).contains(&word_size) {
            Ok(word_size)
        } else {
            Err(InvalidWordSize(word_size))
        }
    }

    pub fn word_size(&self) -> i64 {
        self.word_size
    }
}

impl FrameFactory for StackFrameFactory {
    type Frame = StackFrame;

    fn new_frame(&self, label: Label, formal_count: usize, _names: &mut NameGen) -> StackFrame {
        let formals = (0..formal_count)
            .map(|index| {
                let slot = i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(2));
                Access::InFrame(slot.saturating_mul(self.word_size))
            })
            .collect();
        StackFrame {
            label,
            formals,
            word_size: self.word_size,
            fp: self.fp,
            rv: self.rv,
            locals_in_frame: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackFrame {
    label: Label,
    formals: Vec<Access>,
    word_size: i64,
    fp: Temp,
    rv: Temp,
    locals_in_frame: i64,
}

impl Frame for StackFrame {
    fn label(&self) -> &Label {
        &self.label
    }

    fn formals(&self) -> &[Access] {
        &self.formals
    }

    fn alloc_local(&mut self, escapes: bool, names: &mut NameGen) -> Access {
        if escapes {
            self.locals_in_frame = self.locals_in_frame.saturating_add(1);
            Access::InFrame(self.locals_in_frame.saturating_mul(-self.word_size))
        } else {
            Access::InReg(names.fresh_temp())
        }
    }

    fn fp(&self) -> IrExp {
        IrExp::Temp(self.fp)
    }

    fn rv(&self) -> IrExp {
        IrExp::Temp(self.rv)
    }

    fn proc_entry_exit1(&self, body: IrStm) -> IrStm {
        // Callee-save and argument shuffling belong to the backend.
        body
    }
}
