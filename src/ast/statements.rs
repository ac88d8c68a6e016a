use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{FTag, Id, NodeId},
    expressions::Expr,
    patterns::Ptrn,
};

#[derive(Debug)]
pub enum Stmt {
    Expr(ExprStmt),
    Assign(AssignStmt),
    Let(LetStmt),
    Nom(NomStmt),
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Expr(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Let(stmt) => &stmt.span,
            Stmt::Nom(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug)]
pub struct AssignStmt {
    pub lhs: Expr,
    pub op: TokenKind,
    pub rhs: Expr,
    pub span: Span,
}

#[derive(Debug)]
pub struct LetStmt {
    pub ptrn: Ptrn,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct NomStmt {
    pub nom: Nom,
    pub span: Span,
}

/// A nominal declaration: named, visible to siblings in the same
/// statement run, and therefore potentially mutually recursive.
#[derive(Debug)]
pub enum Nom {
    Abs(AbsNom),
    Nom(NomNom),
    Sig(SigNom),
}

impl Nom {
    pub fn node(&self) -> NodeId {
        match self {
            Nom::Abs(nom) => nom.node,
            Nom::Nom(nom) => nom.node,
            Nom::Sig(nom) => nom.node,
        }
    }

    pub fn id(&self) -> &Id {
        match self {
            Nom::Abs(nom) => &nom.id,
            Nom::Nom(nom) => &nom.id,
            Nom::Sig(nom) => &nom.id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Nom::Abs(nom) => &nom.span,
            Nom::Nom(nom) => &nom.span,
            Nom::Sig(nom) => &nom.span,
        }
    }
}

/// A function (`fn`), continuation (`cn`) or dependent (`\`) abstraction.
///
/// An `fn` with an explicit codomain is rewritten at parse time into
/// continuation-passing style: the domain becomes a pair of the written
/// domain and a synthesized anonymous continuation parameter of type
/// `Cn codom`, and the codomain becomes `⊥`. Later passes rely on this
/// shape and never see the sugared form.
#[derive(Debug)]
pub struct AbsNom {
    pub node: NodeId,
    pub tag: FTag,
    pub id: Id,
    pub meta: Option<Ptrn>,
    pub dom: Ptrn,
    pub codom: Box<Expr>,
    pub body: Box<Expr>,
    pub span: Span,
}

/// `nom x: T = body` — a named alias.
#[derive(Debug)]
pub struct NomNom {
    pub node: NodeId,
    pub id: Id,
    pub ty: Box<Expr>,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SigTag {
    Struct,
    Trait,
}

impl SigTag {
    pub fn spelling(self) -> &'static str {
        match self {
            SigTag::Struct => "struct",
            SigTag::Trait => "trait",
        }
    }
}

/// `struct`/`trait` declaration.
// TODO: parse and carry the member list once the surface syntax settles.
#[derive(Debug)]
pub struct SigNom {
    pub node: NodeId,
    pub tag: SigTag,
    pub id: Id,
    pub span: Span,
}
