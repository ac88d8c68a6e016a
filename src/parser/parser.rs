//! Parser state and entry points.
//!
//! The parser owns the token vector, a cursor that clamps at the trailing
//! `Eof` token (so the stream behaves as infinite), the span of the
//! previously consumed token (for zero-width synthesized nodes) and the
//! expression lookup tables.
//!
//! Conventions, shared by every `parse_*` function:
//! * With `ctxt == None` the caller guarantees the lookahead fits, or
//!   handles the alternative itself — no diagnostic is emitted.
//! * With `ctxt == Some(..)` the construct is mandatory here; a mismatch
//!   reports "expected X, got Y while parsing Z" and yields an
//!   error-kind sentinel so parsing continues.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{
        ast::{Id, NodeId, Prg},
        expressions::{BlockExpr, BottomExpr, ErrorExpr, Expr, TupExpr, UnknownExpr},
    },
    comp::Comp,
    errors::errors::ErrorImpl,
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{
    expr::parse_expr,
    lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup},
    stmt::parse_prg,
};

/// Number of lookahead tokens the grammar needs.
pub const MAX_AHEAD: usize = 3;

pub struct Parser<'c> {
    /// Compilation context: symbols and diagnostics
    comp: &'c mut Comp,
    /// The token stream, ending with one `Eof` token
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Span of the previously consumed token
    prev: Span,
    /// Lookup table for null denotation (prefix/primary) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers
    binding_power_lookup: BPLookup,
    /// Counter for stamping declaration/use nodes
    current_id: u32,
}

impl<'c> Parser<'c> {
    pub fn new(comp: &'c mut Comp, tokens: Vec<Token>, file: Rc<String>) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof),
            "token stream must end with an eof token"
        );
        let prev = Span {
            start: crate::Position(0, Rc::clone(&file)),
            end: crate::Position(0, file),
        };
        Parser {
            comp,
            tokens,
            pos: 0,
            prev,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: 1024, // Give some space for reserved ids
        }
    }

    pub fn comp(&mut self) -> &mut Comp {
        self.comp
    }

    /// Lookahead without consuming; `n` is clamped to the trailing `Eof`,
    /// so the stream never runs out.
    pub fn ahead(&self, n: usize) -> &Token {
        debug_assert!(n < MAX_AHEAD);
        self.tokens
            .get(self.pos + n)
            .unwrap_or_else(|| self.tokens.last().expect("token stream ends with eof"))
    }

    pub fn current_token(&self) -> &Token {
        self.ahead(0)
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Consumes and returns the current token. Consuming `Eof` yields
    /// `Eof` again indefinitely.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        self.prev = token.span.clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token, which the caller has already matched.
    pub fn eat(&mut self, kind: TokenKind) -> Token {
        debug_assert_eq!(self.current_token_kind(), kind, "internal parser error");
        self.advance()
    }

    /// Consumes the current token if it has the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() != kind {
            return false;
        }
        self.advance();
        true
    }

    /// Consumes a mandatory token, reporting a parse error naming `ctxt`
    /// when the lookahead does not match. Never consumes on mismatch.
    pub fn expect(&mut self, kind: TokenKind, ctxt: &str) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            return true;
        }
        self.err_expected(&format!("'{}'", kind.spelling()), ctxt);
        false
    }

    /// Reports "expected {what}, got '{found}' while parsing {ctxt}".
    pub fn err_expected(&mut self, what: &str, ctxt: &str) {
        let found = self.current_token().describe(self.comp);
        let position = self.current_token().span.start.clone();
        self.comp.err(
            position,
            ErrorImpl::ExpectedToken {
                expected: what.to_string(),
                found,
                ctxt: ctxt.to_string(),
            },
        );
    }

    /// Stamps a fresh id onto a declaration or use node.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    pub fn prev_span(&self) -> Span {
        self.prev.clone()
    }

    /// Span from `start` up to the previously consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        Span {
            start: start.start.clone(),
            end: self.prev.end.clone(),
        }
    }

    pub fn can_start_expr(&self, kind: TokenKind) -> bool {
        self.nud_lookup.contains_key(&kind)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix/primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Parses a comma-separated list between two delimiters. The opening
    /// delimiter must already be matched by the caller.
    pub fn parse_list<T>(
        &mut self,
        ctxt: &str,
        delim_l: TokenKind,
        delim_r: TokenKind,
        f: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        self.eat(delim_l);
        let result = self.parse_sep_list(delim_r, TokenKind::Comma, f);
        self.expect(delim_r, ctxt);
        result
    }

    /// Parses a `sep`-separated list running up to (not consuming)
    /// `delim_r`. Trailing separators are allowed.
    pub fn parse_sep_list<T>(
        &mut self,
        delim_r: TokenKind,
        sep: TokenKind,
        mut f: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let mut result = vec![];
        if !self.at(delim_r) {
            loop {
                result.push(f(self));
                if !(self.accept(sep) && !self.at(delim_r)) {
                    break;
                }
            }
        }
        result
    }

    /*
     * synthesized nodes, all zero-width at the previous token
     */

    pub fn mk_anonymous_id(&mut self) -> Id {
        let span = self.prev.after();
        self.mk_anonymous_id_at(span)
    }

    pub fn mk_anonymous_id_at(&mut self, span: Span) -> Id {
        let sym = self.comp.sym("_");
        Id { sym, span }
    }

    pub fn mk_unknown_expr(&self) -> Expr {
        Expr::Unknown(UnknownExpr {
            span: self.prev.after(),
        })
    }

    pub fn mk_error_expr(&self) -> Expr {
        Expr::Error(ErrorExpr {
            span: self.prev.after(),
        })
    }

    pub fn mk_bottom_expr(&self) -> Expr {
        Expr::Bottom(BottomExpr {
            span: self.prev.after(),
        })
    }

    pub fn mk_unit_tup(&self) -> Expr {
        Expr::Tup(TupExpr {
            elems: vec![],
            ty: Box::new(self.mk_unknown_expr()),
            span: self.prev.after(),
        })
    }

    pub fn mk_empty_block_expr(&self) -> BlockExpr {
        BlockExpr {
            stmts: vec![],
            expr: Box::new(self.mk_unit_tup()),
            span: self.prev.after(),
        }
    }
}

/// Parses a token stream into a program.
///
/// This is the main entry point for parsing. It always returns a [`Prg`],
/// no matter how malformed the input is; check `comp.num_errors()` for
/// overall success.
pub fn parse(comp: &mut Comp, tokens: Vec<Token>, file: Rc<String>) -> Prg {
    let mut parser = Parser::new(comp, tokens, file);
    create_token_lookups(&mut parser);
    parse_prg(&mut parser)
}

/// Tokenizes and parses `source` as a program.
pub fn parse_source(comp: &mut Comp, source: &str, file: &str) -> Prg {
    let tokens = tokenize(comp, source, Some(file.to_string()));
    parse(comp, tokens, Rc::new(file.to_string()))
}

/// Tokenizes and parses `source` as a single expression; used by tests
/// and the binder's unit fixtures.
pub fn parse_expr_source(comp: &mut Comp, source: &str) -> Expr {
    let tokens = tokenize(comp, source, Some("<inline>".to_string()));
    let mut parser = Parser::new(comp, tokens, Rc::new("<inline>".to_string()));
    create_token_lookups(&mut parser);
    parse_expr(&mut parser, Some("global expression"), BindingPower::Bottom)
}
