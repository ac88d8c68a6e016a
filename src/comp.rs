//! Compilation context shared by every stage of the pipeline.
//!
//! A [`Comp`] owns the symbol interner, the accumulated diagnostics and the
//! driver options. It is created once per compilation and passed by mutable
//! reference into the lexer, the parser and the binder; nothing in the
//! pipeline holds ambient global state.

use indexmap::IndexSet;

use crate::{
    errors::errors::{Error, ErrorImpl, Severity},
    Position,
};

/// An interned string handle. Equality is handle equality, not string
/// comparison; the spelling lives in the [`Comp`] that produced it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Sym(u32);

pub struct Comp {
    syms: IndexSet<String>,
    anonymous: Sym,
    diagnostics: Vec<Error>,
    num_errors: usize,
    num_warnings: usize,
    /// Suppress the grouping parentheses the pretty-printer emits by default.
    pub fancy: bool,
    /// Dump the pretty-printed program after binding.
    pub emit_ast: bool,
}

impl Comp {
    pub fn new() -> Self {
        let mut comp = Comp {
            syms: IndexSet::new(),
            anonymous: Sym(0),
            diagnostics: Vec::new(),
            num_errors: 0,
            num_warnings: 0,
            fancy: false,
            emit_ast: false,
        };
        comp.anonymous = comp.sym("_");
        comp
    }

    /// Interns `string` and returns its handle. Interning the same spelling
    /// twice returns the same handle.
    pub fn sym(&mut self, string: &str) -> Sym {
        let (index, _) = self.syms.insert_full(string.to_string());
        Sym(index as u32)
    }

    /// The spelling behind a handle.
    pub fn sym_str(&self, sym: Sym) -> &str {
        self.syms
            .get_index(sym.0 as usize)
            .map(|s| s.as_str())
            .unwrap_or("<?>")
    }

    /// `_` never enters a scope and cannot be used as a value.
    pub fn is_anonymous(&self, sym: Sym) -> bool {
        sym == self.anonymous
    }

    pub fn err(&mut self, position: Position, error: ErrorImpl) {
        self.num_errors += 1;
        self.diagnostics
            .push(Error::with_severity(error, position, Severity::Error));
    }

    pub fn warn(&mut self, position: Position, error: ErrorImpl) {
        self.num_warnings += 1;
        self.diagnostics
            .push(Error::with_severity(error, position, Severity::Warning));
    }

    /// Notes attach additional locations to the preceding error and do not
    /// count towards the error total.
    pub fn note(&mut self, position: Position, error: ErrorImpl) {
        self.diagnostics
            .push(Error::with_severity(error, position, Severity::Note));
    }

    pub fn num_errors(&self) -> usize {
        self.num_errors
    }

    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }
}

impl Default for Comp {
    fn default() -> Self {
        Self::new()
    }
}
