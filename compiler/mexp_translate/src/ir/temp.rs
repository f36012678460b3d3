//! Temporaries, labels, and the per-compilation generator that hands them out.

use std::fmt;

use mexp_ir::Name;

/// An abstract register. Unlimited supply; the backend maps them to machine
/// registers or spill slots.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(u32);

impl Temp {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Temp(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A symbolic code or data address.
///
/// Either named (`main`, `print`, `fn.square`) or generated by a
/// [`NameGen`] (`L0`, `L1`, ...). Generated names never contain a `.`, so
/// they cannot collide with function labels.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Name);

impl Label {
    pub fn named(name: impl Into<Name>) -> Self {
        Label(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fresh temporary and label source.
///
/// One per compilation. Two translations driven by separate generators
/// produce identical numbering.
#[derive(Debug, Default)]
pub struct NameGen {
    next_temp: u32,
    next_label: u32,
}

impl NameGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_temp(&mut self) -> Temp {
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub fn fresh_label(&mut self) -> Label {
        let label = Label::named(format!("L{}", self.next_label));
        self.next_label += 1;
        label
    }

    /// Number of temporaries handed out so far.
    pub fn temps_issued(&self) -> u32 {
        self.next_temp
    }
}
