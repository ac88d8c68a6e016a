use crate::{
    comp::{Comp, Sym},
    Span,
};

use super::statements::Stmt;

/// Identity of a declaration or use site, stamped by the parser.
/// Side tables produced by later passes are keyed by these.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct NodeId(pub u32);

/// Flavor of an abstraction, application or function type:
/// direct/dependent style (`\`, `\/`, brackets), value level (`fn`,
/// `Fn`, parens) or continuation (`cn`, `Cn`, `![`).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FTag {
    DS,
    Fn,
    Cn,
}

impl FTag {
    pub fn abs_spelling(self) -> &'static str {
        match self {
            FTag::DS => "\\",
            FTag::Fn => "fn",
            FTag::Cn => "cn",
        }
    }

    pub fn pi_spelling(self) -> &'static str {
        match self {
            FTag::DS => "\\/",
            FTag::Fn => "Fn",
            FTag::Cn => "Cn",
        }
    }
}

/// An identifier occurrence: the interned symbol plus where it was written.
#[derive(Debug, Clone)]
pub struct Id {
    pub sym: Sym,
    pub span: Span,
}

impl Id {
    pub fn is_anonymous(&self, comp: &Comp) -> bool {
        comp.is_anonymous(self.sym)
    }
}

/// The root of a compilation unit: a list of top-level statements.
#[derive(Debug)]
pub struct Prg {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}
