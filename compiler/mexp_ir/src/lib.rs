//! mexp IR - source tree and scoping types
//!
//! This crate contains the data structures every mexp pass shares:
//! - Spans for source locations
//! - Names for identifiers
//! - The source tree (`Program`, `Stmt`, `Expr`, ...) handed over by the parser
//! - `ScopeTable`, the persistent name→value table used for all scoping
//!
//! # Pipeline Position
//!
//! ```text
//! Parser (external) → **mexp_ir tree** → mexp_resolve → mexp_translate → backend (external)
//! ```

pub mod ast;
mod name;
mod span;
pub mod table;

pub use ast::{
    Assign, Expr, ExprKind, FunctionDecl, NodeList, Param, Print, Program, Stmt, Type,
};
pub use name::Name;
pub use span::Span;
pub use table::{DuplicateKey, ScopeTable};
