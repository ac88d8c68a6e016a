use crate::{
    ast::{
        ast::{FTag, Id},
        expressions::{
            AbsExpr, AppExpr, ArExpr, Expr, FieldExpr, ForExpr, IdExpr, IfExpr, InfixExpr,
            KeyExpr, LitExpr, PiExpr, PkExpr, PostfixExpr, PrefixExpr, SigmaExpr, TupElem,
            TupExpr, WhileExpr,
        },
        patterns::{Bndr, ErrorBndr, IdBndr, Ptrn, SigBndr, TupPtrn},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{is_right_assoc, BindingPower},
    parser::Parser,
    stmt::{mk_abs_nom, parse_abs_body, parse_abs_codom, parse_block_expr, parse_ptrn},
};

/// Precedence-climbing expression parser. Parses one primary expression,
/// then folds in postfix constructs (field access, application, `++`/`--`,
/// which bind tighter than any operator) and infix operators whose power
/// beats `min_bp` — or ties it, for the right-associative arrow.
pub fn parse_expr(parser: &mut Parser, ctxt: Option<&str>, min_bp: BindingPower) -> Expr {
    let mut lhs = parse_primary_expr(parser, ctxt);

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => lhs = parse_field_expr(parser, lhs),
            TokenKind::ParenL | TokenKind::BracketL | TokenKind::BangBracketL => {
                lhs = parse_app_expr(parser, lhs)
            }
            TokenKind::Inc | TokenKind::Dec => lhs = parse_postfix_expr(parser, lhs),
            kind => {
                let bp = match parser.get_bp_lookup().get(&kind).copied() {
                    Some(bp) => bp,
                    None => break,
                };
                if bp > min_bp || (bp == min_bp && is_right_assoc(kind)) {
                    let led_fn = parser
                        .get_led_lookup()
                        .get(&kind)
                        .copied()
                        .expect("every ranked operator has an infix handler");
                    lhs = led_fn(parser, lhs, bp);
                } else {
                    break;
                }
            }
        }
    }

    lhs
}

pub fn parse_primary_expr(parser: &mut Parser, ctxt: Option<&str>) -> Expr {
    let kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&kind).copied() {
        Some(nud_fn) => nud_fn(parser),
        None => {
            debug_assert!(ctxt.is_some(), "caller must ensure an expression starts here");
            parser.err_expected("an expression", ctxt.unwrap_or("expression"));
            parser.mk_error_expr()
        }
    }
}

pub fn parse_infix_expr(parser: &mut Parser, lhs: Expr, bp: BindingPower) -> Expr {
    let op = parser.advance().kind;
    let rhs = parse_expr(parser, Some("right-hand side of a binary expression"), bp);
    let span = lhs.span().to(rhs.span());

    Expr::Infix(InfixExpr {
        lhs: Box::new(lhs),
        op,
        rhs: Box::new(rhs),
        span,
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let op = parser.advance().kind;
    let rhs = parse_expr(
        parser,
        Some("right-hand side of a unary expression"),
        BindingPower::Unary,
    );

    Expr::Prefix(PrefixExpr {
        op,
        rhs: Box::new(rhs),
        span: parser.span_from(&start),
    })
}

pub fn parse_postfix_expr(parser: &mut Parser, lhs: Expr) -> Expr {
    let start = lhs.span().clone();
    let op = parser.advance().kind;

    Expr::Postfix(PostfixExpr {
        lhs: Box::new(lhs),
        op,
        span: parser.span_from(&start),
    })
}

pub fn parse_field_expr(parser: &mut Parser, lhs: Expr) -> Expr {
    let start = lhs.span().clone();
    parser.eat(TokenKind::Dot);
    let id = parse_id(parser, Some("field expression"));

    Expr::Field(FieldExpr {
        lhs: Box::new(lhs),
        id,
        span: parser.span_from(&start),
    })
}

pub fn parse_app_expr(parser: &mut Parser, callee: Expr) -> Expr {
    let start = callee.span().clone();
    let delim_l = parser.current_token_kind();
    let tag = match delim_l {
        TokenKind::BracketL => FTag::DS,
        TokenKind::ParenL => FTag::Fn,
        TokenKind::BangBracketL => FTag::Cn,
        _ => unreachable!("parse_app_expr dispatched on an application delimiter"),
    };
    let arg = parse_tup_expr(parser, delim_l);

    Expr::App(AppExpr {
        tag,
        callee: Box::new(callee),
        arg,
        span: parser.span_from(&start),
    })
}

/*
 * primary expressions
 */

pub fn parse_id(parser: &mut Parser, ctxt: Option<&str>) -> Id {
    if parser.at(TokenKind::Id) {
        let token = parser.eat(TokenKind::Id);
        let sym = token.sym().expect("identifier tokens carry their symbol");
        return Id {
            sym,
            span: token.span,
        };
    }

    debug_assert!(ctxt.is_some(), "caller must ensure an identifier is next");
    parser.err_expected("an identifier", ctxt.unwrap_or("identifier"));
    let sym = parser.comp().sym("<error>");
    Id {
        sym,
        span: parser.prev_span().after(),
    }
}

/// With a context the ascription is mandatory; without, a missing `:`
/// yields an unknown type for inference to fill in.
pub fn parse_type_ascr(parser: &mut Parser, ctxt: Option<&str>) -> Expr {
    if let Some(ctxt) = ctxt {
        parser.expect(TokenKind::Colon, ctxt);
        return parse_expr(parser, Some("type ascription"), BindingPower::Bottom);
    }

    if parser.accept(TokenKind::Colon) {
        parse_expr(parser, Some("type ascription"), BindingPower::Bottom)
    } else {
        parser.mk_unknown_expr()
    }
}

pub fn parse_id_expr(parser: &mut Parser) -> Expr {
    let node = parser.advance_id();
    let id = parse_id(parser, None);
    Expr::Id(IdExpr {
        node,
        span: id.span.clone(),
        id,
    })
}

pub fn parse_key_expr(parser: &mut Parser) -> Expr {
    let token = parser.advance();
    Expr::Key(KeyExpr {
        kind: token.kind,
        sym: token.sym().expect("keyword tokens carry their spelling"),
        span: token.span,
    })
}

pub fn parse_lit_expr(parser: &mut Parser) -> Expr {
    let token = parser.advance();
    Expr::Lit(LitExpr::new(&token))
}

pub fn parse_match_expr(parser: &mut Parser) -> Expr {
    let token = parser.advance();
    let position = token.span.start.clone();
    parser.comp().err(
        position,
        ErrorImpl::Unsupported {
            construct: "match expressions".to_string(),
        },
    );
    parser.mk_error_expr()
}

/*
 * binders
 */

pub fn parse_bndr(parser: &mut Parser, ctxt: &str) -> Bndr {
    match parser.current_token_kind() {
        TokenKind::Id => Bndr::Id(parse_id_bndr(parser)),
        TokenKind::BracketL => Bndr::Sig(parse_sig_bndr(parser)),
        kind if parser.can_start_expr(kind) => {
            // anonymous binder around a bare type expression
            let start = parser.current_token().span.clone();
            let node = parser.advance_id();
            let id = parser.mk_anonymous_id();
            let ty = parse_expr(
                parser,
                Some("type of an identifier binder"),
                BindingPower::Ann,
            );
            Bndr::Id(IdBndr {
                node,
                id,
                ty: Box::new(ty),
                span: parser.span_from(&start),
            })
        }
        _ => {
            parser.err_expected("a binder", ctxt);
            Bndr::Error(ErrorBndr {
                span: parser.prev_span().after(),
            })
        }
    }
}

pub fn parse_id_bndr(parser: &mut Parser) -> IdBndr {
    let start = parser.current_token().span.clone();
    let node = parser.advance_id();

    let id = if parser.ahead(0).is(TokenKind::Id) && parser.ahead(1).is(TokenKind::Colon) {
        let id = parse_id(parser, None);
        parser.eat(TokenKind::Colon);
        id
    } else {
        parser.mk_anonymous_id()
    };

    let ty = parse_expr(
        parser,
        Some("type of an identifier binder"),
        BindingPower::Ann,
    );
    IdBndr {
        node,
        id,
        ty: Box::new(ty),
        span: parser.span_from(&start),
    }
}

pub fn parse_sig_bndr(parser: &mut Parser) -> SigBndr {
    let start = parser.current_token().span.clone();
    let elems = parser.parse_list(
        "closing delimiter of a sigma binder",
        TokenKind::BracketL,
        TokenKind::BracketR,
        |parser| parse_bndr(parser, "element of a sigma binder"),
    );
    SigBndr {
        elems,
        span: parser.span_from(&start),
    }
}

/*
 * type-level and aggregate expressions
 */

pub fn parse_pi_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let tag_kind = parser.advance().kind;
    let tag = match tag_kind {
        TokenKind::Forall => FTag::DS,
        TokenKind::FnTy => FTag::Fn,
        TokenKind::CnTy => FTag::Cn,
        _ => unreachable!("parse_pi_expr dispatched on a function-type keyword"),
    };

    let dom = parse_bndr(parser, "domain of a function type");

    // a continuation's codomain is always ⊥
    let codom = if tag == FTag::Cn {
        parser.mk_bottom_expr()
    } else {
        parser.expect(TokenKind::Arrow, tag_kind.spelling());
        parse_expr(
            parser,
            Some("codomain of a function type"),
            BindingPower::Bottom,
        )
    };

    Expr::Pi(PiExpr {
        tag,
        dom,
        codom: Box::new(codom),
        span: parser.span_from(&start),
    })
}

pub fn parse_abs_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let tag_kind = parser.advance().kind;
    let tag = super::stmt::abs_tag(tag_kind);
    let id = parser.mk_anonymous_id();

    // the domain is written without parentheses in expression position
    let dom_start = parser.current_token().span.clone();
    let mut elems = vec![];
    if !abs_dom_ends(parser) {
        loop {
            elems.push(parse_ptrn(parser, "domain of a function"));
            if !(parser.accept(TokenKind::Comma) && !abs_dom_ends(parser)) {
                break;
            }
        }
    }
    let dom_span = if elems.is_empty() {
        parser.prev_span().after()
    } else {
        parser.span_from(&dom_start)
    };
    let dom = Ptrn::Tup(TupPtrn {
        elems,
        span: dom_span,
    });

    let codom = parse_abs_codom(parser, tag);
    let body = parse_abs_body(parser);
    let span = parser.span_from(&start);
    let abs = mk_abs_nom(parser, tag, id, None, dom, codom, body, span);

    Expr::Abs(AbsExpr {
        span: abs.span.clone(),
        abs,
    })
}

fn abs_dom_ends(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Assign | TokenKind::BraceL | TokenKind::Arrow
    )
}

pub fn parse_pk_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let angle = parser.accept(TokenKind::AngleL);
    if !angle {
        parser.eat(TokenKind::Pk);
        parser.expect(TokenKind::ParenL, "opening delimiter of a pack");
    }

    let doms = parser.parse_sep_list(TokenKind::Semicolon, TokenKind::Comma, |parser| {
        parse_bndr(parser, "dimensions of a pack")
    });
    parser.expect(TokenKind::Semicolon, "pack");
    let body = parse_expr(parser, Some("body of a pack"), BindingPower::Bottom);
    parser.expect(
        if angle {
            TokenKind::AngleR
        } else {
            TokenKind::ParenR
        },
        "closing delimiter of a pack",
    );

    Expr::Pk(PkExpr {
        doms,
        body: Box::new(body),
        span: parser.span_from(&start),
    })
}

pub fn parse_ar_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let quote = parser.accept(TokenKind::QuoteL);
    if !quote {
        parser.eat(TokenKind::Ar);
        parser.expect(TokenKind::BracketL, "opening delimiter of an array");
    }

    let doms = parser.parse_sep_list(TokenKind::Semicolon, TokenKind::Comma, |parser| {
        parse_bndr(parser, "dimensions of an array")
    });
    parser.expect(TokenKind::Semicolon, "array");
    let body = parse_expr(parser, Some("body of an array"), BindingPower::Bottom);
    parser.expect(
        if quote {
            TokenKind::QuoteR
        } else {
            TokenKind::BracketR
        },
        "closing delimiter of an array",
    );

    Expr::Ar(ArExpr {
        doms,
        body: Box::new(body),
        span: parser.span_from(&start),
    })
}

pub fn parse_sig_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    let elems = parser.parse_list(
        "closing delimiter of a sigma expression",
        TokenKind::BracketL,
        TokenKind::BracketR,
        |parser| parse_bndr(parser, "binder element of a sigma expression"),
    );

    Expr::Sigma(SigmaExpr {
        elems,
        span: parser.span_from(&start),
    })
}

/// Parses a delimited tuple, as application argument or plain expression.
pub fn parse_tup_expr(parser: &mut Parser, delim_l: TokenKind) -> TupExpr {
    let start = parser.current_token().span.clone();
    let delim_r = match delim_l {
        TokenKind::ParenL => TokenKind::ParenR,
        _ => TokenKind::BracketR,
    };
    parser.eat(delim_l);
    let (elems, _) = parse_tup_elems(parser, delim_r);
    parser.expect(delim_r, "tuple");
    let ty = parse_type_ascr(parser, None);

    TupExpr {
        elems,
        ty: Box::new(ty),
        span: parser.span_from(&start),
    }
}

/// `(expr)` is grouping; everything else — named elements, a trailing
/// comma, an ascription, any other arity — builds a tuple.
pub fn parse_tup_or_group_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::ParenL);
    let (mut elems, trailing) = parse_tup_elems(parser, TokenKind::ParenR);
    parser.expect(TokenKind::ParenR, "tuple");

    if elems.len() == 1 && !trailing && !parser.at(TokenKind::Colon) {
        let anonymous = {
            let sym = elems[0].id.sym;
            parser.comp().is_anonymous(sym)
        };
        if anonymous {
            return elems.pop().expect("one element was just checked").expr;
        }
    }

    let ty = parse_type_ascr(parser, None);
    Expr::Tup(TupExpr {
        elems,
        ty: Box::new(ty),
        span: parser.span_from(&start),
    })
}

fn parse_tup_elems(parser: &mut Parser, delim_r: TokenKind) -> (Vec<TupElem>, bool) {
    let mut elems = vec![];
    let mut trailing = false;

    if !parser.at(delim_r) {
        loop {
            let start = parser.current_token().span.clone();
            let id = if parser.ahead(0).is(TokenKind::Id) && parser.ahead(1).is(TokenKind::Assign)
            {
                let id = parse_id(parser, None);
                parser.eat(TokenKind::Assign);
                id
            } else {
                parser.mk_anonymous_id()
            };
            let expr = parse_expr(parser, Some("tuple element"), BindingPower::Bottom);
            let span = parser.span_from(&start);
            elems.push(TupElem { id, expr, span });

            if parser.accept(TokenKind::Comma) {
                if parser.at(delim_r) {
                    trailing = true;
                    break;
                }
            } else {
                break;
            }
        }
    }

    (elems, trailing)
}

/*
 * control flow
 */

pub fn parse_if_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::If);
    let cond = parse_expr(
        parser,
        Some("condition of an if-expression"),
        BindingPower::Bottom,
    );
    let then_block = parse_block_expr(parser, Some("consequence of an if-expression"));

    let else_expr = if parser.accept(TokenKind::Else) {
        if parser.at(TokenKind::If) {
            parse_if_expr(parser)
        } else {
            Expr::Block(parse_block_expr(
                parser,
                Some("alternative of an if-expression"),
            ))
        }
    } else {
        Expr::Block(parser.mk_empty_block_expr())
    };

    Expr::If(IfExpr {
        cond: Box::new(cond),
        then_expr: Box::new(Expr::Block(then_block)),
        else_expr: Box::new(else_expr),
        span: parser.span_from(&start),
    })
}

pub fn parse_while_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::While);
    let cond = parse_expr(
        parser,
        Some("condition of a while-expression"),
        BindingPower::Bottom,
    );
    let body = parse_block_expr(parser, Some("body of a while-expression"));

    Expr::While(WhileExpr {
        cond: Box::new(cond),
        body,
        span: parser.span_from(&start),
    })
}

pub fn parse_for_expr(parser: &mut Parser) -> Expr {
    let start = parser.current_token().span.clone();
    // `for` and `in` delimit the pattern list
    let ptrn = super::stmt::parse_tup_ptrn(parser, TokenKind::For, TokenKind::In, None);
    let expr = parse_expr(
        parser,
        Some("iterated expression of a for-expression"),
        BindingPower::Bottom,
    );
    let body = parse_block_expr(parser, Some("body of a for-expression"));

    Expr::For(ForExpr {
        ptrn: Ptrn::Tup(ptrn),
        expr: Box::new(expr),
        body,
        span: parser.span_from(&start),
    })
}
