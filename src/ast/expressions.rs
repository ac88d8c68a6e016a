use crate::{
    comp::Sym,
    lexer::tokens::{Token, TokenKind, TokenValue},
    Span,
};

use super::{
    ast::{FTag, Id, NodeId},
    patterns::{Bndr, Ptrn},
    statements::{AbsNom, Stmt},
};

#[derive(Debug)]
pub enum Expr {
    Abs(AbsExpr),
    App(AppExpr),
    Ar(ArExpr),
    Block(BlockExpr),
    Bottom(BottomExpr),
    Error(ErrorExpr),
    Field(FieldExpr),
    For(ForExpr),
    Id(IdExpr),
    If(IfExpr),
    Infix(InfixExpr),
    Key(KeyExpr),
    Lit(LitExpr),
    Pi(PiExpr),
    Pk(PkExpr),
    Postfix(PostfixExpr),
    Prefix(PrefixExpr),
    Sigma(SigmaExpr),
    Tup(TupExpr),
    Unknown(UnknownExpr),
    While(WhileExpr),
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Abs(expr) => &expr.span,
            Expr::App(expr) => &expr.span,
            Expr::Ar(expr) => &expr.span,
            Expr::Block(expr) => &expr.span,
            Expr::Bottom(expr) => &expr.span,
            Expr::Error(expr) => &expr.span,
            Expr::Field(expr) => &expr.span,
            Expr::For(expr) => &expr.span,
            Expr::Id(expr) => &expr.span,
            Expr::If(expr) => &expr.span,
            Expr::Infix(expr) => &expr.span,
            Expr::Key(expr) => &expr.span,
            Expr::Lit(expr) => &expr.span,
            Expr::Pi(expr) => &expr.span,
            Expr::Pk(expr) => &expr.span,
            Expr::Postfix(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Sigma(expr) => &expr.span,
            Expr::Tup(expr) => &expr.span,
            Expr::Unknown(expr) => &expr.span,
            Expr::While(expr) => &expr.span,
        }
    }

    /// Statement-like expressions may stand in a block without a trailing
    /// semicolon and still not become the block's result.
    pub fn is_stmt_like(&self) -> bool {
        matches!(
            self,
            Expr::Block(_) | Expr::If(_) | Expr::While(_) | Expr::For(_)
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Expr::Unknown(_))
    }

    /// The implicit `()` — an empty positional tuple without ascription.
    pub fn is_unit_tup(&self) -> bool {
        match self {
            Expr::Tup(tup) => tup.elems.is_empty() && tup.ty.is_unknown(),
            _ => false,
        }
    }
}

/// An abstraction in expression position wraps an anonymous [`AbsNom`].
#[derive(Debug)]
pub struct AbsExpr {
    pub abs: AbsNom,
    pub span: Span,
}

#[derive(Debug)]
pub struct AppExpr {
    pub tag: FTag,
    pub callee: Box<Expr>,
    pub arg: TupExpr,
    pub span: Span,
}

/// `ar[dims; body]` or `«dims; body»`.
#[derive(Debug)]
pub struct ArExpr {
    pub doms: Vec<Bndr>,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct BlockExpr {
    pub stmts: Vec<Stmt>,
    pub expr: Box<Expr>,
    pub span: Span,
}

/// The divergence marker `⊥`; only ever synthesized (continuation
/// codomains), never written.
#[derive(Debug)]
pub struct BottomExpr {
    pub span: Span,
}

#[derive(Debug)]
pub struct ErrorExpr {
    pub span: Span,
}

#[derive(Debug)]
pub struct FieldExpr {
    pub lhs: Box<Expr>,
    pub id: Id,
    pub span: Span,
}

#[derive(Debug)]
pub struct ForExpr {
    pub ptrn: Ptrn,
    pub expr: Box<Expr>,
    pub body: BlockExpr,
    pub span: Span,
}

/// An identifier reference — a use site, resolved by the binder.
#[derive(Debug)]
pub struct IdExpr {
    pub node: NodeId,
    pub id: Id,
    pub span: Span,
}

#[derive(Debug)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct InfixExpr {
    pub lhs: Box<Expr>,
    pub op: TokenKind,
    pub rhs: Box<Expr>,
    pub span: Span,
}

/// A builtin constant keyword (`true`, `false`, `type`, `arity`, ...).
#[derive(Debug)]
pub struct KeyExpr {
    pub kind: TokenKind,
    pub sym: Sym,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lit {
    S(i64),
    U(u64),
    F(f64),
}

#[derive(Debug)]
pub struct LitExpr {
    pub lit: Lit,
    pub span: Span,
}

impl LitExpr {
    pub fn new(token: &Token) -> LitExpr {
        let lit = match token.value {
            TokenValue::S(s) => Lit::S(s),
            TokenValue::U(u) => Lit::U(u),
            TokenValue::F(f) => Lit::F(f),
            TokenValue::None | TokenValue::Sym(_) => Lit::U(0),
        };
        LitExpr {
            lit,
            span: token.span.clone(),
        }
    }
}

/// A function type: `\/ x: T -> U`, `Fn T -> U` or `Cn T` (whose
/// codomain is always `⊥`).
#[derive(Debug)]
pub struct PiExpr {
    pub tag: FTag,
    pub dom: Bndr,
    pub codom: Box<Expr>,
    pub span: Span,
}

/// `pk(dims; body)` or `‹dims; body›`.
#[derive(Debug)]
pub struct PkExpr {
    pub doms: Vec<Bndr>,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct PostfixExpr {
    pub lhs: Box<Expr>,
    pub op: TokenKind,
    pub span: Span,
}

#[derive(Debug)]
pub struct PrefixExpr {
    pub op: TokenKind,
    pub rhs: Box<Expr>,
    pub span: Span,
}

/// `[bndr, ...]` — a dependent tuple type whose element names are
/// visible to later elements.
#[derive(Debug)]
pub struct SigmaExpr {
    pub elems: Vec<Bndr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct TupExpr {
    pub elems: Vec<TupElem>,
    pub ty: Box<Expr>,
    pub span: Span,
}

/// One tuple element, optionally named: `x= expr`. Positional elements
/// carry a synthesized anonymous id.
#[derive(Debug)]
pub struct TupElem {
    pub id: Id,
    pub expr: Expr,
    pub span: Span,
}

/// A type the parser leaves for inference to fill in.
#[derive(Debug)]
pub struct UnknownExpr {
    pub span: Span,
}

#[derive(Debug)]
pub struct WhileExpr {
    pub cond: Box<Expr>,
    pub body: BlockExpr,
    pub span: Span,
}
