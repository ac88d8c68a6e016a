use crate::{
    ast::{
        ast::{FTag, Id, Prg},
        expressions::{BlockExpr, BottomExpr, Expr, PiExpr},
        patterns::{Bndr, ErrorPtrn, IdBndr, IdPtrn, Ptrn, TupPtrn},
        statements::{AbsNom, AssignStmt, ExprStmt, LetStmt, Nom, NomNom, NomStmt, SigNom, SigTag, Stmt},
    },
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_expr, parse_id, parse_type_ascr},
    lookups::BindingPower,
    parser::Parser,
};

pub fn parse_prg(parser: &mut Parser) -> Prg {
    let start = parser.current_token().span.clone();
    let mut stmts = vec![];

    while !parser.at(TokenKind::Eof) {
        match parser.current_token_kind() {
            TokenKind::Semicolon => {
                parser.advance(); // stray semicolon
            }
            kind if kind.starts_nom() => stmts.push(parse_nom_stmt(parser)),
            TokenKind::Let => stmts.push(parse_let_stmt(parser)),
            _ => {
                parser.err_expected("a nominal or let statement", "program");
                parser.advance();
            }
        }
    }

    Prg {
        stmts,
        span: parser.span_from(&start),
    }
}

/*
 * statements
 */

pub fn parse_let_stmt(parser: &mut Parser) -> Stmt {
    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::Let);
    let ptrn = parse_ptrn(parser, "let statement");

    let init = if parser.accept(TokenKind::Assign) {
        Some(parse_expr(
            parser,
            Some("initialization expression of a let statement"),
            BindingPower::Bottom,
        ))
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "the end of a let statement");

    Stmt::Let(LetStmt {
        ptrn,
        init,
        span: parser.span_from(&start),
    })
}

pub fn parse_nom_stmt(parser: &mut Parser) -> Stmt {
    let nom = parse_nom(parser);
    let span = nom.span().clone();
    Stmt::Nom(NomStmt { nom, span })
}

/*
 * nominal declarations
 */

pub fn parse_nom(parser: &mut Parser) -> Nom {
    match parser.current_token_kind() {
        TokenKind::Nom => Nom::Nom(parse_nom_nom(parser)),
        TokenKind::Lam | TokenKind::Cn | TokenKind::Fn => Nom::Abs(parse_abs_nom(parser)),
        TokenKind::Struct | TokenKind::Trait => Nom::Sig(parse_sig_nom(parser)),
        _ => unreachable!("parse_nom dispatched on a nominal keyword"),
    }
}

fn parse_nom_nom(parser: &mut Parser) -> NomNom {
    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::Nom);
    let node = parser.advance_id();
    let id = parse_id(parser, Some("nominal"));
    let ty = parse_type_ascr(parser, Some("type ascription of a nominal"));
    parser.expect(TokenKind::Assign, "nominal");
    let body = parse_expr(parser, Some("body of a nominal"), BindingPower::Bottom);

    NomNom {
        node,
        id,
        ty: Box::new(ty),
        body: Box::new(body),
        span: parser.span_from(&start),
    }
}

fn parse_abs_nom(parser: &mut Parser) -> AbsNom {
    let start = parser.current_token().span.clone();
    let tag = abs_tag(parser.advance().kind);

    let id = if parser.at(TokenKind::Id) {
        parse_id(parser, None)
    } else {
        parser.mk_anonymous_id()
    };

    let meta = if parser.at(TokenKind::BracketL) {
        Some(Ptrn::Tup(parse_tup_ptrn(
            parser,
            TokenKind::BracketL,
            TokenKind::BracketR,
            None,
        )))
    } else {
        None
    };

    let dom = Ptrn::Tup(parse_tup_ptrn(
        parser,
        TokenKind::ParenL,
        TokenKind::ParenR,
        Some("domain of a function"),
    ));

    let codom = parse_abs_codom(parser, tag);
    let body = parse_abs_body(parser);
    let span = parser.span_from(&start);
    mk_abs_nom(parser, tag, id, meta, dom, codom, body, span)
}

fn parse_sig_nom(parser: &mut Parser) -> SigNom {
    let start = parser.current_token().span.clone();
    let tag = if parser.advance().kind == TokenKind::Struct {
        SigTag::Struct
    } else {
        SigTag::Trait
    };
    let node = parser.advance_id();
    let id = parse_id(parser, Some(tag.spelling()));
    parser.expect(TokenKind::BraceL, tag.spelling());
    // TODO: member declarations
    parser.expect(TokenKind::BraceR, tag.spelling());

    SigNom {
        node,
        tag,
        id,
        span: parser.span_from(&start),
    }
}

pub fn abs_tag(kind: TokenKind) -> FTag {
    match kind {
        TokenKind::Lam => FTag::DS,
        TokenKind::Fn => FTag::Fn,
        TokenKind::Cn => FTag::Cn,
        _ => unreachable!("abstractions start with fn, cn or a lambda"),
    }
}

pub fn parse_abs_codom(parser: &mut Parser, tag: FTag) -> Expr {
    if !parser.accept(TokenKind::Arrow) {
        return parser.mk_unknown_expr();
    }

    let codom = parse_expr(parser, Some("codomain of a function"), BindingPower::Bottom);
    if tag == FTag::Cn {
        let position = codom.span().start.clone();
        parser.comp().err(
            position,
            crate::errors::errors::ErrorImpl::ContinuationCodomain,
        );
        parser.mk_unknown_expr()
    } else {
        codom
    }
}

pub fn parse_abs_body(parser: &mut Parser) -> Expr {
    if parser.accept(TokenKind::Assign) {
        parse_expr(parser, Some("body of a function"), BindingPower::Bottom)
    } else {
        Expr::Block(parse_block_expr(parser, Some("body of a function")))
    }
}

/// Assembles an abstraction, applying the continuation-passing rewrite:
/// `fn` with an explicit codomain `T` gets a synthesized anonymous
/// continuation parameter of type `Cn T` next to its domain and the
/// codomain `⊥`; a `cn` has codomain `⊥` outright.
#[allow(clippy::too_many_arguments)]
pub fn mk_abs_nom(
    parser: &mut Parser,
    tag: FTag,
    id: Id,
    meta: Option<Ptrn>,
    dom: Ptrn,
    codom: Expr,
    body: Expr,
    span: Span,
) -> AbsNom {
    let node = parser.advance_id();

    let (dom, codom) = match tag {
        FTag::Fn if !codom.is_unknown() => {
            let ret_span = codom.span().after();
            let cn_dom = Bndr::Id(IdBndr {
                node: parser.advance_id(),
                id: parser.mk_anonymous_id_at(ret_span.clone()),
                ty: Box::new(codom),
                span: ret_span.clone(),
            });
            let cn_ty = Expr::Pi(PiExpr {
                tag: FTag::Cn,
                dom: cn_dom,
                codom: Box::new(Expr::Bottom(BottomExpr {
                    span: ret_span.clone(),
                })),
                span: ret_span.clone(),
            });
            let ret_ptrn = Ptrn::Id(IdPtrn {
                node: parser.advance_id(),
                is_mut: false,
                id: parser.mk_anonymous_id_at(ret_span.clone()),
                ty: Box::new(cn_ty),
                span: ret_span.clone(),
            });
            let dom_span = dom.span().clone();
            let dom = Ptrn::Tup(TupPtrn {
                elems: vec![dom, ret_ptrn],
                span: dom_span,
            });
            (dom, Expr::Bottom(BottomExpr { span: ret_span }))
        }
        FTag::Cn => {
            let bottom_span = dom.span().after();
            (dom, Expr::Bottom(BottomExpr { span: bottom_span }))
        }
        _ => (dom, codom),
    };

    AbsNom {
        node,
        tag,
        id,
        meta,
        dom,
        codom: Box::new(codom),
        body: Box::new(body),
        span,
    }
}

/*
 * patterns
 */

pub fn parse_ptrn(parser: &mut Parser, ctxt: &str) -> Ptrn {
    match parser.current_token_kind() {
        TokenKind::Mut | TokenKind::Id => Ptrn::Id(parse_id_ptrn(parser)),
        TokenKind::ParenL => Ptrn::Tup(parse_tup_ptrn(
            parser,
            TokenKind::ParenL,
            TokenKind::ParenR,
            None,
        )),
        _ => {
            parser.err_expected("a pattern", ctxt);
            Ptrn::Error(ErrorPtrn {
                span: parser.prev_span().after(),
            })
        }
    }
}

pub fn parse_id_ptrn(parser: &mut Parser) -> IdPtrn {
    let start = parser.current_token().span.clone();
    let node = parser.advance_id();
    let is_mut = parser.accept(TokenKind::Mut);
    let id = parse_id(
        parser,
        if is_mut {
            Some("mutable identifier pattern")
        } else {
            None
        },
    );

    let ty = if parser.accept(TokenKind::Colon) {
        parse_expr(
            parser,
            Some("type ascription of an identifier pattern"),
            BindingPower::Bottom,
        )
    } else {
        parser.mk_unknown_expr()
    };

    IdPtrn {
        node,
        is_mut,
        id,
        ty: Box::new(ty),
        span: parser.span_from(&start),
    }
}

pub fn parse_tup_ptrn(
    parser: &mut Parser,
    delim_l: TokenKind,
    delim_r: TokenKind,
    ctxt: Option<&str>,
) -> TupPtrn {
    if let Some(ctxt) = ctxt {
        if !parser.at(delim_l) {
            parser.err_expected("a tuple pattern", ctxt);
            return TupPtrn {
                elems: vec![],
                span: parser.prev_span().after(),
            };
        }
    }

    let start = parser.current_token().span.clone();
    let elems = parser.parse_list(
        "closing delimiter of a tuple pattern",
        delim_l,
        delim_r,
        |parser| parse_ptrn(parser, "element of a tuple pattern"),
    );

    TupPtrn {
        elems,
        span: parser.span_from(&start),
    }
}

/*
 * blocks
 */

/// Parses a block, deciding statement-vs-result for each construct: a
/// trailing `;` or a statement-like shape makes a statement, an
/// assignment operator turns the parsed expression into an assignment
/// statement, and the one remaining expression before `}` becomes the
/// block's result (implicit `()` if there is none).
pub fn parse_block_expr(parser: &mut Parser, ctxt: Option<&str>) -> BlockExpr {
    if let Some(ctxt) = ctxt {
        if !parser.at(TokenKind::BraceL) {
            parser.err_expected("a block expression", ctxt);
            return parser.mk_empty_block_expr();
        }
    }

    let start = parser.current_token().span.clone();
    parser.eat(TokenKind::BraceL);
    let mut stmts = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Semicolon => {
                parser.advance(); // stray semicolon
            }
            TokenKind::Nom | TokenKind::Struct | TokenKind::Trait => {
                stmts.push(parse_nom_stmt(parser))
            }
            TokenKind::Let => stmts.push(parse_let_stmt(parser)),
            TokenKind::BraceR => {
                parser.eat(TokenKind::BraceR);
                return BlockExpr {
                    stmts,
                    expr: Box::new(parser.mk_unit_tup()),
                    span: parser.span_from(&start),
                };
            }
            // a named abstraction is a nominal statement, an anonymous
            // one is an expression
            TokenKind::Fn | TokenKind::Cn | TokenKind::Lam
                if parser.ahead(1).is(TokenKind::Id) =>
            {
                stmts.push(parse_nom_stmt(parser))
            }
            kind if parser.can_start_expr(kind) => {
                let expr_start = parser.current_token().span.clone();
                let expr = parse_expr(parser, None, BindingPower::Bottom);

                let next = parser.current_token_kind();
                if next.is_assign() {
                    let op = parser.advance().kind;
                    let rhs = parse_expr(
                        parser,
                        Some("right-hand side of an assignment statement"),
                        BindingPower::Bottom,
                    );
                    parser.expect(TokenKind::Semicolon, "the end of an assignment statement");
                    let span = parser.span_from(&expr_start);
                    stmts.push(Stmt::Assign(AssignStmt {
                        lhs: expr,
                        op,
                        rhs,
                        span,
                    }));
                    continue;
                }

                if next == TokenKind::Semicolon {
                    let span = expr.span().clone();
                    stmts.push(Stmt::Expr(ExprStmt { expr, span }));
                    continue; // the semicolon is skipped on the next round
                }

                if expr.is_stmt_like() && !parser.at(TokenKind::BraceR) {
                    let span = expr.span().clone();
                    stmts.push(Stmt::Expr(ExprStmt { expr, span }));
                    continue;
                }

                parser.expect(TokenKind::BraceR, "block expression");
                return BlockExpr {
                    stmts,
                    expr: Box::new(expr),
                    span: parser.span_from(&start),
                };
            }
            _ => {
                parser.expect(TokenKind::BraceR, "block expression");
                return BlockExpr {
                    stmts,
                    expr: Box::new(parser.mk_unit_tup()),
                    span: parser.span_from(&start),
                };
            }
        }
    }
}

pub fn parse_block_expr_nud(parser: &mut Parser) -> Expr {
    Expr::Block(parse_block_expr(parser, None))
}
