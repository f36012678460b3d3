//! Tree IR translation for mexp.
//!
//! Consumes a [`Resolved`](mexp_resolve::Resolved) program and produces a
//! list of [`Fragment`]s: one procedure per function plus `main`, and one
//! data fragment per top-level literal binding. Storage decisions go
//! through a [`FrameFactory`], so the same translation serves any target.
//!
//! # Pipeline Position
//!
//! ```text
//! Parser (external) → Resolve → **Translate** → backend (external)
//! ```
//!
//! # Usage
//!
//! ```text
//! let mut names = NameGen::new();
//! let factory = StackFrameFactory::new(8, &mut names)?;
//! let fragments = translate_program(&resolved, &factory, &mut names)?;
//! ```

mod error;
pub mod frame;
mod fragment;
pub mod ir;
mod lower;

pub use error::TranslateError;
pub use fragment::{DataFragment, Fragment, Fragments, ProcFragment};
pub use frame::{
    Access, Frame, FrameFactory, InvalidWordSize, StackFrame, StackFrameFactory, MAX_WORD_SIZE,
};
pub use ir::{IrExp, IrStm, Label, NameGen, Temp};
pub use lower::{
    function_label, translate_program, FUNCTION_LABEL_PREFIX, MAIN_LABEL, PRINT_LABEL,
};
