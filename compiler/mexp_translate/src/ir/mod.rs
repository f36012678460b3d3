//! Tree IR: the target of translation and the input to the backend.

mod temp;
mod tree;

pub use temp::{Label, NameGen, Temp};
pub use tree::{BinOp, IrExp, IrNode, IrStm, RelOp};
