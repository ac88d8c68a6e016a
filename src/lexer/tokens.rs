use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{
    comp::{Comp, Sym},
    Span,
};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("ar", TokenKind::Ar);
        map.insert("arity", TokenKind::Arity);
        map.insert("Arity", TokenKind::ArityTy);
        map.insert("cn", TokenKind::Cn);
        map.insert("Cn", TokenKind::CnTy);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("fn", TokenKind::Fn);
        map.insert("Fn", TokenKind::FnTy);
        map.insert("for", TokenKind::For);
        map.insert("if", TokenKind::If);
        map.insert("impl", TokenKind::Impl);
        map.insert("in", TokenKind::In);
        map.insert("let", TokenKind::Let);
        map.insert("marity", TokenKind::Marity);
        map.insert("Marity", TokenKind::MarityTy);
        map.insert("match", TokenKind::Match);
        map.insert("mut", TokenKind::Mut);
        map.insert("nom", TokenKind::Nom);
        map.insert("pk", TokenKind::Pk);
        map.insert("struct", TokenKind::Struct);
        map.insert("trait", TokenKind::Trait);
        map.insert("true", TokenKind::True);
        map.insert("type", TokenKind::TypeKey);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,
    Id,

    // literals
    LitS,
    LitU,
    LitF,

    // delimiters
    ParenL,
    ParenR,
    BracketL,
    BracketR,
    BraceL,
    BraceR,
    BangBracketL, // ![  opens a continuation-style application
    AngleL,       // ‹   pack
    AngleR,       // ›
    QuoteL,       // «   array
    QuoteR,       // »

    // punctuation
    Colon,
    ColonColon,
    Comma,
    Dot,
    Semicolon,
    Arrow,

    // binder introducers
    Lam,    // \ or λ
    Forall, // \/ or ∀

    // assignment operators
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,

    // operators
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndAnd,
    Or,
    OrOr,
    Xor,
    Not,
    Tilde,
    Inc,
    Dec,
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
    Ne,

    // reserved words
    Ar,
    Arity,
    ArityTy,
    Cn,
    CnTy,
    Else,
    False,
    Fn,
    FnTy,
    For,
    If,
    Impl,
    In,
    Let,
    Marity,
    MarityTy,
    Match,
    Mut,
    Nom,
    Pk,
    Struct,
    Trait,
    True,
    TypeKey,
    While,
}

impl TokenKind {
    pub fn spelling(self) -> &'static str {
        match self {
            TokenKind::Eof => "<eof>",
            TokenKind::Id => "<identifier>",
            TokenKind::LitS => "<signed integer literal>",
            TokenKind::LitU => "<integer literal>",
            TokenKind::LitF => "<floating-point literal>",
            TokenKind::ParenL => "(",
            TokenKind::ParenR => ")",
            TokenKind::BracketL => "[",
            TokenKind::BracketR => "]",
            TokenKind::BraceL => "{",
            TokenKind::BraceR => "}",
            TokenKind::BangBracketL => "![",
            TokenKind::AngleL => "‹",
            TokenKind::AngleR => "›",
            TokenKind::QuoteL => "«",
            TokenKind::QuoteR => "»",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Arrow => "->",
            TokenKind::Lam => "\\",
            TokenKind::Forall => "\\/",
            TokenKind::Assign => "=",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::RemAssign => "%=",
            TokenKind::ShlAssign => "<<=",
            TokenKind::ShrAssign => ">>=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Rem => "%",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::And => "&",
            TokenKind::AndAnd => "&&",
            TokenKind::Or => "|",
            TokenKind::OrOr => "||",
            TokenKind::Xor => "^",
            TokenKind::Not => "!",
            TokenKind::Tilde => "~",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Ar => "ar",
            TokenKind::Arity => "arity",
            TokenKind::ArityTy => "Arity",
            TokenKind::Cn => "cn",
            TokenKind::CnTy => "Cn",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::Fn => "fn",
            TokenKind::FnTy => "Fn",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Impl => "impl",
            TokenKind::In => "in",
            TokenKind::Let => "let",
            TokenKind::Marity => "marity",
            TokenKind::MarityTy => "Marity",
            TokenKind::Match => "match",
            TokenKind::Mut => "mut",
            TokenKind::Nom => "nom",
            TokenKind::Pk => "pk",
            TokenKind::Struct => "struct",
            TokenKind::Trait => "trait",
            TokenKind::True => "true",
            TokenKind::TypeKey => "type",
            TokenKind::While => "while",
        }
    }

    pub fn is_lit(self) -> bool {
        matches!(self, TokenKind::LitS | TokenKind::LitU | TokenKind::LitF)
    }

    pub fn is_assign(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::AddAssign
                | TokenKind::SubAssign
                | TokenKind::MulAssign
                | TokenKind::DivAssign
                | TokenKind::RemAssign
                | TokenKind::ShlAssign
                | TokenKind::ShrAssign
                | TokenKind::AndAssign
                | TokenKind::OrAssign
                | TokenKind::XorAssign
        )
    }

    /// Keywords that introduce a nominal declaration.
    pub fn starts_nom(self) -> bool {
        matches!(
            self,
            TokenKind::Nom
                | TokenKind::Fn
                | TokenKind::Cn
                | TokenKind::Lam
                | TokenKind::Struct
                | TokenKind::Trait
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// A token's payload: interned symbol for identifiers and keywords,
/// a number for literals, nothing for fixed-spelling tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    None,
    Sym(Sym),
    S(i64),
    U(u64),
    F(f64),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn sym(&self) -> Option<Sym> {
        match self.value {
            TokenValue::Sym(sym) => Some(sym),
            _ => None,
        }
    }

    /// The token as the user wrote it, for diagnostics.
    pub fn describe(&self, comp: &Comp) -> String {
        match self.value {
            TokenValue::Sym(sym) => comp.sym_str(sym).to_string(),
            TokenValue::S(s) => s.to_string(),
            TokenValue::U(u) => u.to_string(),
            TokenValue::F(f) => f.to_string(),
            TokenValue::None => self.kind.spelling().to_string(),
        }
    }
}
