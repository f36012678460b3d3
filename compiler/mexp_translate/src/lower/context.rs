use std::mem;

use mexp_ir::{Name, ScopeTable};

use crate::frame::{Access, Frame};
use crate::ir::IrExp;

/// Per-function translation state.
///
/// Every frame gets its own context; translating a nested declaration never
/// touches the enclosing one.
#[derive(Debug)]
pub(crate) struct FnCtx<F> {
    pub(crate) frame: F,
    env: ScopeTable<Access>,
    /// Top-level names bound to static data.
    constants: ScopeTable<IrExp>,
    in_function: bool,
}

impl<F: Frame> FnCtx<F> {
    pub(crate) fn program(frame: F) -> Self {
        FnCtx {
            frame,
            env: ScopeTable::empty(),
            constants: ScopeTable::empty(),
            in_function: false,
        }
    }

    pub(crate) fn function(frame: F, env: ScopeTable<Access>) -> Self {
        FnCtx {
            frame,
            env,
            constants: ScopeTable::empty(),
            in_function: true,
        }
    }

    pub(crate) fn in_function(&self) -> bool {
        self.in_function
    }

    pub(crate) fn env(&self) -> &ScopeTable<Access> {
        &self.env
    }

    /// IR reading the current binding of `name`.
    ///
    /// Constants are only visible outside function bodies.
    pub(crate) fn lookup(&self, name: &str) -> Option<IrExp> {
        if !self.in_function {
            if let Some(constant) = self.constants.lookup(name) {
                return Some(constant.clone());
            }
        }
        self.env.lookup(name).map(|access| access.exp(self.frame.fp()))
    }

    /// Rebind `name` to a frame location, hiding any constant of that name.
    pub(crate) fn bind_local(&mut self, name: Name, access: Access) {
        self.constants = mem::take(&mut self.constants).remove(&name);
        self.env = mem::take(&mut self.env).insert(name, access);
    }

    /// Rebind `name` to static data, hiding any local of that name.
    pub(crate) fn bind_constant(&mut self, name: Name, exp: IrExp) {
        self.env = mem::take(&mut self.env).remove(&name);
        self.constants = mem::take(&mut self.constants).insert(name, exp);
    }

    pub(crate) fn into_frame(self) -> F {
        self.frame
    }
}
