//! Translation output: procedures and static data.

use std::fmt;

use crate::frame::Frame;
use crate::ir::{IrStm, Label};

/// A translated function body together with its frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcFragment<F> {
    pub frame: F,
    pub body: IrStm,
}

/// Statically-initialised words at a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataFragment {
    pub label: Label,
    pub values: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment<F> {
    Proc(ProcFragment<F>),
    Data(DataFragment),
}

/// Append-only fragment list, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragments<F> {
    fragments: Vec<Fragment<F>>,
}

impl<F> Fragments<F> {
    pub fn new() -> Self {
        Fragments {
            fragments: Vec::new(),
        }
    }

    pub fn push(&mut self, fragment: Fragment<F>) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment<F>> {
        self.fragments.iter()
    }

    pub fn procs(&self) -> impl Iterator<Item = &ProcFragment<F>> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Proc(procedure) => Some(procedure),
            Fragment::Data(_) => None,
        })
    }

    pub fn data(&self) -> impl Iterator<Item = &DataFragment> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Data(data) => Some(data),
            Fragment::Proc(_) => None,
        })
    }

    pub fn into_vec(self) -> Vec<Fragment<F>> {
        self.fragments
    }
}

impl<F: Frame> Fragments<F> {
    /// The procedure whose frame is labelled `label`.
    pub fn proc_labeled(&self, label: &str) -> Option<&ProcFragment<F>> {
        self.procs().find(|procedure| procedure.frame.label().as_str() == label)
    }
}

impl<F> Default for Fragments<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, F> IntoIterator for &'a Fragments<F> {
    type Item = &'a Fragment<F>;
    type IntoIter = std::slice::Iter<'a, Fragment<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<F: Frame> fmt::Display for ProcFragment<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PROC {}", self.frame.label())?;
        let formals = self.frame.formals().len();
        if formals > 0 {
            write!(f, " ({formals} formals)")?;
        }
        f.write_str(":\n")?;
        for stm in self.body.linearize() {
            writeln!(f, "    {stm}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DataFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DATA {}:", self.label)?;
        for value in &self.values {
            write!(f, " {value}")?;
        }
        f.write_str("\n")
    }
}

impl<F: Frame> fmt::Display for Fragment<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Proc(procedure) => fmt::Display::fmt(procedure, f),
            Fragment::Data(data) => fmt::Display::fmt(data, f),
        }
    }
}

impl<F: Frame> fmt::Display for Fragments<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, fragment) in self.fragments.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(fragment, f)?;
        }
        Ok(())
    }
}
