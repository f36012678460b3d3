//! Source tree produced by the external parser.
//!
//! Nodes are immutable once built and form a strict tree: no node is shared,
//! and identifiers are plain [`Name`]s resolved by lookup. Every pass walks
//! this tree with exhaustive `match`es over [`Stmt`] and [`ExprKind`], so
//! adding a node kind is a compile error in each pass until it is handled.
//!
//! # Shape
//!
//! ```text
//! Program
//!   statements: [Assign | FunctionDecl]*
//!   print:      Print(expr)            -- exactly one, evaluated last
//! ```

mod node_list;

use crate::{Name, Span};

pub use node_list::NodeList;

// ── Types ───────────────────────────────────────────────────────────

/// Declared type of a parameter or function result.
///
/// The type system is mostly erased: `Unknown` is the placeholder bound to
/// every assigned name during symbol resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Integer,
    Boolean,
    Unknown,
}

// ── Program and statements ──────────────────────────────────────────

/// Root of the source tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub statements: NodeList<Stmt>,
    pub print: Print,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Program {
    pub fn new(statements: impl Into<NodeList<Stmt>>, print: Print) -> Self {
        Program {
            statements: statements.into(),
            print,
            span: Span::DUMMY,
        }
    }

    /// Iterate the function declarations in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::Function(decl) => Some(decl),
            Stmt::Assign(_) => None,
        })
    }
}

/// Top-level statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Assign(Assign),
    Function(FunctionDecl),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign(assign) => assign.span,
            Stmt::Function(decl) => decl.span,
        }
    }
}

impl From<Assign> for Stmt {
    fn from(assign: Assign) -> Self {
        Stmt::Assign(assign)
    }
}

impl From<FunctionDecl> for Stmt {
    fn from(decl: FunctionDecl) -> Self {
        Stmt::Function(decl)
    }
}

/// `name = value`: binds `name` in the enclosing scope.
///
/// Assigning the same name twice in one scope is a rebinding, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assign {
    pub name: Name,
    pub value: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Assign {
    pub fn new(name: impl Into<Name>, value: Expr) -> Self {
        Assign {
            name: name.into(),
            value,
            span: Span::DUMMY,
        }
    }
}

/// The trailing `print expr` of a program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Print {
    pub exp: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Print {
    pub fn new(exp: Expr) -> Self {
        Print {
            exp,
            span: Span::DUMMY,
        }
    }
}

/// A function parameter: declared type plus name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub ty: Type,
    pub name: Name,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Param {
    pub fn new(ty: Type, name: impl Into<Name>) -> Self {
        Param {
            ty,
            name: name.into(),
            span: Span::DUMMY,
        }
    }
}

/// A top-level function declaration.
///
/// Functions do not nest. The body holds assignments only and the function
/// yields `return_expr`. Function bodies see their own parameters and locals,
/// never the top-level bindings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub name: Name,
    pub return_type: Type,
    pub params: NodeList<Param>,
    pub body: NodeList<Assign>,
    pub return_expr: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl FunctionDecl {
    pub fn new(
        name: impl Into<Name>,
        return_type: Type,
        params: impl Into<NodeList<Param>>,
        body: impl Into<NodeList<Assign>>,
        return_expr: Expr,
    ) -> Self {
        FunctionDecl {
            name: name.into(),
            return_type,
            params: params.into(),
            body: body.into(),
            return_expr,
            span: Span::DUMMY,
        }
    }
}

// ── Expressions ─────────────────────────────────────────────────────

/// An expression node with its source span.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    IntegerLiteral(i64),
    Identifier(Name),
    LessThan(Box<Expr>, Box<Expr>),
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// `cond ? then_branch : else_branch`
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `callee(args...)`
    Call {
        callee: Name,
        args: NodeList<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Replace the span, keeping the node.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // Builders for hand-constructed trees. All use `Span::DUMMY`.

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::IntegerLiteral(value), Span::DUMMY)
    }

    pub fn ident(name: impl Into<Name>) -> Self {
        Self::new(ExprKind::Identifier(name.into()), Span::DUMMY)
    }

    pub fn less_than(left: Expr, right: Expr) -> Self {
        Self::new(
            ExprKind::LessThan(Box::new(left), Box::new(right)),
            Span::DUMMY,
        )
    }

    pub fn plus(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Plus(Box::new(left), Box::new(right)), Span::DUMMY)
    }

    pub fn minus(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Minus(Box::new(left), Box::new(right)), Span::DUMMY)
    }

    pub fn times(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Times(Box::new(left), Box::new(right)), Span::DUMMY)
    }

    pub fn not(operand: Expr) -> Self {
        Self::new(ExprKind::Not(Box::new(operand)), Span::DUMMY)
    }

    pub fn conditional(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::new(
            ExprKind::Conditional {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            Span::DUMMY,
        )
    }

    pub fn call(callee: impl Into<Name>, args: impl Into<NodeList<Expr>>) -> Self {
        Self::new(
            ExprKind::Call {
                callee: callee.into(),
                args: args.into(),
            },
            Span::DUMMY,
        )
    }

    /// The literal value, if this is an integer literal.
    pub fn as_integer_literal(&self) -> Option<i64> {
        match self.kind {
            ExprKind::IntegerLiteral(value) => Some(value),
            _ => None,
        }
    }
}
