use std::collections::HashMap;

use crate::{ast::expressions::Expr, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest to highest. `Ann` is a floor for binder
/// type positions — no operator maps to it, so a binder's type stops
/// right before `->` while still taking every ordinary operator.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Bottom,
    Arrow,
    Ann,
    OrOr,
    AndAnd,
    Rel,
    Or,
    Xor,
    And,
    Shift,
    Add,
    Mul,
    Unary,
}

pub type NUDHandler = fn(&mut Parser<'_>) -> Expr;
pub type LEDHandler = fn(&mut Parser<'_>, Expr, BindingPower) -> Expr;

pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

/// The function arrow is the one right-associative operator.
pub fn is_right_assoc(kind: TokenKind) -> bool {
    kind == TokenKind::Arrow
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Infix operators
    parser.led(TokenKind::Arrow, BindingPower::Arrow, parse_infix_expr);

    parser.led(TokenKind::OrOr, BindingPower::OrOr, parse_infix_expr);
    parser.led(TokenKind::AndAnd, BindingPower::AndAnd, parse_infix_expr);

    parser.led(TokenKind::Eq, BindingPower::Rel, parse_infix_expr);
    parser.led(TokenKind::Ne, BindingPower::Rel, parse_infix_expr);
    parser.led(TokenKind::Le, BindingPower::Rel, parse_infix_expr);
    parser.led(TokenKind::Ge, BindingPower::Rel, parse_infix_expr);
    parser.led(TokenKind::Lt, BindingPower::Rel, parse_infix_expr);
    parser.led(TokenKind::Gt, BindingPower::Rel, parse_infix_expr);

    parser.led(TokenKind::Or, BindingPower::Or, parse_infix_expr);
    parser.led(TokenKind::Xor, BindingPower::Xor, parse_infix_expr);
    parser.led(TokenKind::And, BindingPower::And, parse_infix_expr);

    parser.led(TokenKind::Shl, BindingPower::Shift, parse_infix_expr);
    parser.led(TokenKind::Shr, BindingPower::Shift, parse_infix_expr);

    parser.led(TokenKind::Add, BindingPower::Add, parse_infix_expr);
    parser.led(TokenKind::Sub, BindingPower::Add, parse_infix_expr);

    parser.led(TokenKind::Mul, BindingPower::Mul, parse_infix_expr);
    parser.led(TokenKind::Div, BindingPower::Mul, parse_infix_expr);
    parser.led(TokenKind::Rem, BindingPower::Mul, parse_infix_expr);

    // Builtin constants
    parser.nud(TokenKind::True, parse_key_expr);
    parser.nud(TokenKind::False, parse_key_expr);
    parser.nud(TokenKind::TypeKey, parse_key_expr);
    parser.nud(TokenKind::Arity, parse_key_expr);
    parser.nud(TokenKind::ArityTy, parse_key_expr);
    parser.nud(TokenKind::Marity, parse_key_expr);
    parser.nud(TokenKind::MarityTy, parse_key_expr);

    // Prefix operators
    parser.nud(TokenKind::Add, parse_prefix_expr);
    parser.nud(TokenKind::Sub, parse_prefix_expr);
    parser.nud(TokenKind::Mul, parse_prefix_expr);
    parser.nud(TokenKind::And, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Tilde, parse_prefix_expr);
    parser.nud(TokenKind::Inc, parse_prefix_expr);
    parser.nud(TokenKind::Dec, parse_prefix_expr);

    // Literals and identifiers
    parser.nud(TokenKind::LitS, parse_lit_expr);
    parser.nud(TokenKind::LitU, parse_lit_expr);
    parser.nud(TokenKind::LitF, parse_lit_expr);
    parser.nud(TokenKind::Id, parse_id_expr);

    // Types and abstractions
    parser.nud(TokenKind::Forall, parse_pi_expr);
    parser.nud(TokenKind::FnTy, parse_pi_expr);
    parser.nud(TokenKind::CnTy, parse_pi_expr);
    parser.nud(TokenKind::Lam, parse_abs_expr);
    parser.nud(TokenKind::Fn, parse_abs_expr);
    parser.nud(TokenKind::Cn, parse_abs_expr);

    // Aggregates
    parser.nud(TokenKind::Pk, parse_pk_expr);
    parser.nud(TokenKind::AngleL, parse_pk_expr);
    parser.nud(TokenKind::Ar, parse_ar_expr);
    parser.nud(TokenKind::QuoteL, parse_ar_expr);
    parser.nud(TokenKind::BracketL, parse_sig_expr);
    parser.nud(TokenKind::ParenL, parse_tup_or_group_expr);
    parser.nud(TokenKind::BraceL, parse_block_expr_nud);

    // Control flow
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::While, parse_while_expr);
    parser.nud(TokenKind::For, parse_for_expr);
    parser.nud(TokenKind::Match, parse_match_expr);
}
