use crate::Span;

use super::{
    ast::{Id, NodeId},
    expressions::Expr,
};

/// Destructuring construct used in `let`, parameter lists and `for`.
/// Type ascriptions on patterns are optional (`UnknownExpr` when absent).
#[derive(Debug)]
pub enum Ptrn {
    Id(IdPtrn),
    Tup(TupPtrn),
    Error(ErrorPtrn),
}

impl Ptrn {
    pub fn span(&self) -> &Span {
        match self {
            Ptrn::Id(ptrn) => &ptrn.span,
            Ptrn::Tup(ptrn) => &ptrn.span,
            Ptrn::Error(ptrn) => &ptrn.span,
        }
    }
}

#[derive(Debug)]
pub struct IdPtrn {
    pub node: NodeId,
    pub is_mut: bool,
    pub id: Id,
    pub ty: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct TupPtrn {
    pub elems: Vec<Ptrn>,
    pub span: Span,
}

#[derive(Debug)]
pub struct ErrorPtrn {
    pub span: Span,
}

/// Dependent-type binder used in pi/sigma/pack/array positions. Unlike a
/// pattern, a binder's type is mandatory, and binders infiltrate the
/// enclosing scope so that later siblings and the body see their names.
#[derive(Debug)]
pub enum Bndr {
    Id(IdBndr),
    Sig(SigBndr),
    Error(ErrorBndr),
}

impl Bndr {
    pub fn span(&self) -> &Span {
        match self {
            Bndr::Id(bndr) => &bndr.span,
            Bndr::Sig(bndr) => &bndr.span,
            Bndr::Error(bndr) => &bndr.span,
        }
    }
}

#[derive(Debug)]
pub struct IdBndr {
    pub node: NodeId,
    pub id: Id,
    pub ty: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct SigBndr {
    pub elems: Vec<Bndr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct ErrorBndr {
    pub span: Span,
}
