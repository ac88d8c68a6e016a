//! Unit tests for the lexer module.

use super::lexer::tokenize;
use super::tokens::{TokenKind, TokenValue};
use crate::comp::Comp;

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut comp = Comp::new();
    tokenize(&mut comp, source, Some("test.kp".to_string()))
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_delimiters_and_punctuation() {
    assert_eq!(
        kinds("{ } ( ) [ ] ‹ › « » : , . \\ \\/ λ ∀"),
        vec![
            TokenKind::BraceL,
            TokenKind::BraceR,
            TokenKind::ParenL,
            TokenKind::ParenR,
            TokenKind::BracketL,
            TokenKind::BracketR,
            TokenKind::AngleL,
            TokenKind::AngleR,
            TokenKind::QuoteL,
            TokenKind::QuoteR,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Lam,
            TokenKind::Forall,
            TokenKind::Lam,
            TokenKind::Forall,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operator_maximal_munch() {
    assert_eq!(
        kinds("<<= << <= < == = != ![ ! ++ +="),
        vec![
            TokenKind::ShlAssign,
            TokenKind::Shl,
            TokenKind::Le,
            TokenKind::Lt,
            TokenKind::Eq,
            TokenKind::Assign,
            TokenKind::Ne,
            TokenKind::BangBracketL,
            TokenKind::Not,
            TokenKind::Inc,
            TokenKind::AddAssign,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_arrow_spellings() {
    assert_eq!(
        kinds("-> → -- -"),
        vec![
            TokenKind::Arrow,
            TokenKind::Arrow,
            TokenKind::Dec,
            TokenKind::Sub,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let mut comp = Comp::new();
    let tokens = tokenize(&mut comp, "fn Fn cn Cn foo let letter _", None);
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Fn,
            TokenKind::FnTy,
            TokenKind::Cn,
            TokenKind::CnTy,
            TokenKind::Id,
            TokenKind::Let,
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Eof,
        ]
    );

    // keywords and identifiers both carry their interned spelling
    let foo = tokens[4].sym().unwrap();
    assert_eq!(comp.sym_str(foo), "foo");
    let fn_sym = tokens[0].sym().unwrap();
    assert_eq!(comp.sym_str(fn_sym), "fn");
    assert!(comp.is_anonymous(tokens[7].sym().unwrap()));
}

#[test]
fn test_number_literals() {
    let mut comp = Comp::new();
    let tokens = tokenize(&mut comp, "42 0x2a 0b101 0o17 3.25 1e3", None);

    assert_eq!(tokens[0].value, TokenValue::U(42));
    assert_eq!(tokens[1].value, TokenValue::U(42));
    assert_eq!(tokens[2].value, TokenValue::U(5));
    assert_eq!(tokens[3].value, TokenValue::U(15));
    assert_eq!(tokens[4].value, TokenValue::F(3.25));
    assert_eq!(tokens[5].value, TokenValue::F(1000.0));
    assert_eq!(tokens[6].kind, TokenKind::Eof);
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("a // line comment\n/* block\ncomment */ b"),
        vec![TokenKind::Id, TokenKind::Id, TokenKind::Eof]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let mut comp = Comp::new();
    let tokens = tokenize(&mut comp, "a /* never closed", None);

    assert_eq!(comp.num_errors(), 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_invalid_character_is_skipped() {
    let mut comp = Comp::new();
    let tokens = tokenize(&mut comp, "let x @ 1;", None);
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    // lexing resumes after the bad character
    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Id,
            TokenKind::LitU,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!(comp.num_errors(), 1);
}

#[test]
fn test_empty_input_yields_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_spans_track_byte_offsets() {
    let mut comp = Comp::new();
    let tokens = tokenize(&mut comp, " test  abc", None);

    assert_eq!(tokens[0].span.start.0, 1);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 7);
    assert_eq!(tokens[1].span.end.0, 10);
}
