//! Unit tests for the parser module.
//!
//! Covers the grammar productions, operator precedence and
//! associativity, the statement-vs-expression rules inside blocks, the
//! continuation-passing rewrite of `fn`, and error recovery.

use crate::ast::ast::FTag;
use crate::ast::expressions::{Expr, Lit};
use crate::ast::patterns::{Bndr, Ptrn};
use crate::ast::statements::{Nom, Stmt};
use crate::comp::Comp;
use crate::lexer::tokens::TokenKind;
use crate::parser::parser::{parse_expr_source, parse_source};

fn parse_expr_ok(source: &str) -> Expr {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, source);
    assert_eq!(comp.num_errors(), 0, "unexpected errors parsing {:?}", source);
    expr
}

fn infix_parts(expr: &Expr) -> (&Expr, TokenKind, &Expr) {
    match expr {
        Expr::Infix(infix) => (&infix.lhs, infix.op, &infix.rhs),
        other => panic!("expected infix expression, got {:?}", other),
    }
}

/*
 * precedence and associativity
 */

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expr_ok("a + b * c");
    let (lhs, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Add);
    assert!(matches!(lhs, Expr::Id(_)));
    let (_, inner_op, _) = infix_parts(rhs);
    assert_eq!(inner_op, TokenKind::Mul);

    let expr = parse_expr_ok("a * b + c");
    let (lhs, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Add);
    let (_, inner_op, _) = infix_parts(lhs);
    assert_eq!(inner_op, TokenKind::Mul);
    assert!(matches!(rhs, Expr::Id(_)));
}

#[test]
fn test_equal_precedence_chains_left() {
    let expr = parse_expr_ok("a - b - c");
    let (lhs, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Sub);
    assert!(matches!(rhs, Expr::Id(_)));
    let (_, inner_op, _) = infix_parts(lhs);
    assert_eq!(inner_op, TokenKind::Sub);
}

#[test]
fn test_arrow_chains_right() {
    let expr = parse_expr_ok("a -> b -> c");
    let (lhs, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Arrow);
    assert!(matches!(lhs, Expr::Id(_)));
    let (_, inner_op, _) = infix_parts(rhs);
    assert_eq!(inner_op, TokenKind::Arrow);
}

#[test]
fn test_relational_below_additive() {
    let expr = parse_expr_ok("a == b + c");
    let (_, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Eq);
    let (_, inner_op, _) = infix_parts(rhs);
    assert_eq!(inner_op, TokenKind::Add);
}

#[test]
fn test_grouping_parentheses_leave_no_node() {
    let expr = parse_expr_ok("(a + b) * c");
    let (lhs, op, _) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Mul);
    let (_, inner_op, _) = infix_parts(lhs);
    assert_eq!(inner_op, TokenKind::Add);
}

#[test]
fn test_prefix_and_postfix() {
    let expr = parse_expr_ok("++a--");
    match expr {
        Expr::Prefix(prefix) => {
            assert_eq!(prefix.op, TokenKind::Inc);
            match *prefix.rhs {
                Expr::Postfix(postfix) => assert_eq!(postfix.op, TokenKind::Dec),
                other => panic!("expected postfix expression, got {:?}", other),
            }
        }
        other => panic!("expected prefix expression, got {:?}", other),
    }
}

#[test]
fn test_application_binds_tighter_than_operators() {
    let expr = parse_expr_ok("f(x) + g[y]");
    let (lhs, op, rhs) = infix_parts(&expr);
    assert_eq!(op, TokenKind::Add);
    match (lhs, rhs) {
        (Expr::App(f), Expr::App(g)) => {
            assert_eq!(f.tag, FTag::Fn);
            assert_eq!(g.tag, FTag::DS);
        }
        other => panic!("expected two applications, got {:?}", other),
    }
}

#[test]
fn test_three_application_families() {
    for (source, tag) in [
        ("f(x)", FTag::Fn),
        ("f[x]", FTag::DS),
        ("f![x]", FTag::Cn),
    ] {
        match parse_expr_ok(source) {
            Expr::App(app) => assert_eq!(app.tag, tag),
            other => panic!("expected application for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_field_access_chains_left() {
    let expr = parse_expr_ok("a.b.c");
    match expr {
        Expr::Field(outer) => match *outer.lhs {
            Expr::Field(_) => {}
            other => panic!("expected nested field access, got {:?}", other),
        },
        other => panic!("expected field access, got {:?}", other),
    }
}

/*
 * tuples
 */

#[test]
fn test_tuple_forms() {
    let mut comp = Comp::new();
    for source in [
        "()",
        "(x,   y)",
        "(x= a, y)",
        "(x= a, y= b)",
        "(x,   y= b)",
        "(x,   y,)",
        "(x= a, y,)",
        "(x= a, y= b,)",
        "(x,   y= b,)",
        "(x,   y): T",
        "(x= a, y): T",
        "(x= a, y= b): T",
        "(x,   y= b): T",
        "(x,   y,): T",
        "(x= a, y,): T",
        "(x= a, y= b,): T",
        "(x,   y= b,): T",
    ] {
        parse_expr_source(&mut comp, source);
    }
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_named_tuple_elements() {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, "(x= a, y)");
    match expr {
        Expr::Tup(tup) => {
            assert_eq!(tup.elems.len(), 2);
            assert!(!tup.elems[0].id.is_anonymous(&comp));
            assert!(tup.elems[1].id.is_anonymous(&comp));
        }
        other => panic!("expected tuple, got {:?}", other),
    }
}

#[test]
fn test_single_element_tuple_needs_trailing_comma() {
    match parse_expr_ok("(x,)") {
        Expr::Tup(tup) => assert_eq!(tup.elems.len(), 1),
        other => panic!("expected tuple, got {:?}", other),
    }
    // without the comma it is just grouping
    assert!(matches!(parse_expr_ok("(x)"), Expr::Id(_)));
}

#[test]
fn test_ascribed_single_element_is_a_tuple() {
    match parse_expr_ok("(x): T") {
        Expr::Tup(tup) => {
            assert_eq!(tup.elems.len(), 1);
            assert!(!tup.ty.is_unknown());
        }
        other => panic!("expected tuple, got {:?}", other),
    }
}

/*
 * packs, arrays, sigmas, pis
 */

#[test]
fn test_pack() {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, "pk(x: int; y)");
    assert_eq!(comp.num_errors(), 0);
    match expr {
        Expr::Pk(pk) => {
            assert_eq!(pk.doms.len(), 1);
            match &pk.doms[0] {
                Bndr::Id(bndr) => {
                    assert!(!bndr.id.is_anonymous(&comp));
                    assert!(matches!(*bndr.ty, Expr::Id(_)));
                }
                other => panic!("expected identifier binder, got {:?}", other),
            }
            assert!(matches!(*pk.body, Expr::Id(_)));
        }
        other => panic!("expected pack, got {:?}", other),
    }

    // anonymous binder around a bare type
    let expr = parse_expr_source(&mut comp, "pk(int; y)");
    match expr {
        Expr::Pk(pk) => match &pk.doms[0] {
            Bndr::Id(bndr) => assert!(bndr.id.is_anonymous(&comp)),
            other => panic!("expected identifier binder, got {:?}", other),
        },
        other => panic!("expected pack, got {:?}", other),
    }
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_variadic_array() {
    let mut comp = Comp::new();
    parse_expr_source(&mut comp, "ar[x: int; y]");
    parse_expr_source(&mut comp, "ar[int; y]");
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_unicode_delimiters_for_pack_and_array() {
    let mut comp = Comp::new();
    parse_expr_source(&mut comp, "‹x: int; y›");
    parse_expr_source(&mut comp, "«int; y»");
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_sigma_forms() {
    let mut comp = Comp::new();
    for source in [
        "[]",
        "[x,      y]",
        "[x: int, y]",
        "[x: int, y: int]",
        "[x,      y: int]",
        "[x,      y,]",
        "[x: int, y,]",
        "[x: int, y: int,]",
        "[x,      y: int,]",
    ] {
        parse_expr_source(&mut comp, source);
    }
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_sigma_bare_names_are_types_of_anonymous_binders() {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, "[x, y]");
    match expr {
        Expr::Sigma(sigma) => {
            assert_eq!(sigma.elems.len(), 2);
            for elem in &sigma.elems {
                match elem {
                    Bndr::Id(bndr) => {
                        assert!(bndr.id.is_anonymous(&comp));
                        assert!(matches!(*bndr.ty, Expr::Id(_)));
                    }
                    other => panic!("expected identifier binder, got {:?}", other),
                }
            }
        }
        other => panic!("expected sigma, got {:?}", other),
    }
}

#[test]
fn test_pi_forms() {
    match parse_expr_ok("Fn int -> bool") {
        Expr::Pi(pi) => {
            assert_eq!(pi.tag, FTag::Fn);
            assert!(!matches!(*pi.codom, Expr::Bottom(_)));
        }
        other => panic!("expected pi, got {:?}", other),
    }

    // a continuation type has no written codomain; it is ⊥
    match parse_expr_ok("Cn int") {
        Expr::Pi(pi) => {
            assert_eq!(pi.tag, FTag::Cn);
            assert!(matches!(*pi.codom, Expr::Bottom(_)));
        }
        other => panic!("expected pi, got {:?}", other),
    }

    match parse_expr_ok("\\/ x: type -> x") {
        Expr::Pi(pi) => {
            assert_eq!(pi.tag, FTag::DS);
            match pi.dom {
                Bndr::Id(bndr) => assert!(matches!(*bndr.ty, Expr::Key(_))),
                other => panic!("expected identifier binder, got {:?}", other),
            }
        }
        other => panic!("expected pi, got {:?}", other),
    }
}

/*
 * blocks and statements
 */

#[test]
fn test_if_else_if_chain() {
    let expr = parse_expr_ok("if cond { x } else if cond { y } else { z }");
    match expr {
        Expr::If(if_expr) => match *if_expr.else_expr {
            Expr::If(_) => {}
            other => panic!("expected nested if in else branch, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_if_without_else_gets_empty_block() {
    let expr = parse_expr_ok("if cond { x }");
    match expr {
        Expr::If(if_expr) => match *if_expr.else_expr {
            Expr::Block(ref block) => {
                assert!(block.stmts.is_empty());
                assert!(block.expr.is_unit_tup());
            }
            ref other => panic!("expected block, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_statement_like_expressions_in_blocks() {
    let mut comp = Comp::new();
    for source in [
        "if cond { x }",
        "if cond { x } else { y }",
        "if cond { x } else if cond { y }",
        "if cond { x } else if cond { y } else { z }",
        "{ foo; if cond { x } }",
        "{ foo; if cond { x } else { y } }",
        "{ foo; if cond { x } else if cond { y } }",
        "{ foo; if cond { x } else if cond { y } else { z } }",
        "{ if cond { x } foo }",
        "{ if cond { x } else { y } foo }",
        "{ if cond { x } else if cond { y } foo }",
        "{ if cond { x } else if cond { y } else { z } foo }",
        "{ if cond { x }; foo }",
        "{ if cond { x } else { y }; foo }",
        "{ if cond { x } else if cond { y }; foo }",
        "{ if cond { x } else if cond { y } else { z }; foo }",
    ] {
        parse_expr_source(&mut comp, source);
    }
    assert_eq!(comp.num_errors(), 0);
}

#[test]
fn test_block_statement_vs_result() {
    // the if becomes a statement, foo the result
    let expr = parse_expr_ok("{ if cond { x } foo }");
    match expr {
        Expr::Block(block) => {
            assert_eq!(block.stmts.len(), 1);
            assert!(matches!(block.stmts[0], Stmt::Expr(_)));
            assert!(matches!(*block.expr, Expr::Id(_)));
        }
        other => panic!("expected block, got {:?}", other),
    }

    // a block ending in a statement results in the implicit unit tuple
    let expr = parse_expr_ok("{ foo; }");
    match expr {
        Expr::Block(block) => {
            assert_eq!(block.stmts.len(), 1);
            assert!(block.expr.is_unit_tup());
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_assignment_statement() {
    let expr = parse_expr_ok("{ a = b; a += c; }");
    match expr {
        Expr::Block(block) => {
            assert_eq!(block.stmts.len(), 2);
            match (&block.stmts[0], &block.stmts[1]) {
                (Stmt::Assign(first), Stmt::Assign(second)) => {
                    assert_eq!(first.op, TokenKind::Assign);
                    assert_eq!(second.op, TokenKind::AddAssign);
                }
                other => panic!("expected assignments, got {:?}", other),
            }
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_let_statement_forms() {
    let mut comp = Comp::new();
    let prg = parse_source(
        &mut comp,
        "let x = 1; let mut y: int = 2; let (a, b) = p; let z: int;",
        "test.kp",
    );
    assert_eq!(comp.num_errors(), 0);
    assert_eq!(prg.stmts.len(), 4);

    match &prg.stmts[1] {
        Stmt::Let(stmt) => match &stmt.ptrn {
            Ptrn::Id(ptrn) => {
                assert!(ptrn.is_mut);
                assert!(!ptrn.ty.is_unknown());
            }
            other => panic!("expected identifier pattern, got {:?}", other),
        },
        other => panic!("expected let statement, got {:?}", other),
    }

    match &prg.stmts[3] {
        Stmt::Let(stmt) => assert!(stmt.init.is_none()),
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_while_and_for() {
    let mut comp = Comp::new();
    parse_expr_source(&mut comp, "while x < 10 { x = x + 1; }");
    parse_expr_source(&mut comp, "for x in xs { x }");
    parse_expr_source(&mut comp, "for x, y in xs { x }");
    assert_eq!(comp.num_errors(), 0);
}

/*
 * nominals
 */

#[test]
fn test_nominal_forms_parse() {
    let mut comp = Comp::new();
    let prg = parse_source(
        &mut comp,
        "nom two: int = 2 fn add(a: int, b: int) = a cn done(x: int) { x } \\ dep(x: type) -> x = x struct Point {} trait Ord {}",
        "test.kp",
    );
    assert_eq!(comp.num_errors(), 0);
    assert_eq!(prg.stmts.len(), 6);
}

#[test]
fn test_fn_with_codomain_rewrites_to_cps() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "fn f(x: int) -> int { x }", "test.kp");
    assert_eq!(comp.num_errors(), 0);

    let abs = match &prg.stmts[0] {
        Stmt::Nom(stmt) => match &stmt.nom {
            Nom::Abs(abs) => abs,
            other => panic!("expected abstraction, got {:?}", other),
        },
        other => panic!("expected nominal statement, got {:?}", other),
    };

    assert_eq!(abs.tag, FTag::Fn);
    // the codomain was folded into a continuation parameter
    assert!(matches!(*abs.codom, Expr::Bottom(_)));

    let elems = match &abs.dom {
        Ptrn::Tup(tup) => &tup.elems,
        other => panic!("expected tuple domain, got {:?}", other),
    };
    assert_eq!(elems.len(), 2);
    assert!(matches!(elems[0], Ptrn::Tup(_)));

    match &elems[1] {
        Ptrn::Id(ret) => {
            assert!(ret.id.is_anonymous(&comp));
            match &*ret.ty {
                Expr::Pi(pi) => {
                    assert_eq!(pi.tag, FTag::Cn);
                    assert!(matches!(*pi.codom, Expr::Bottom(_)));
                }
                other => panic!("expected continuation type, got {:?}", other),
            }
        }
        other => panic!("expected synthesized continuation parameter, got {:?}", other),
    }
}

#[test]
fn test_fn_without_codomain_keeps_domain() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "fn f(x: int) { x }", "test.kp");
    assert_eq!(comp.num_errors(), 0);

    match &prg.stmts[0] {
        Stmt::Nom(stmt) => match &stmt.nom {
            Nom::Abs(abs) => {
                assert!(abs.codom.is_unknown());
                match &abs.dom {
                    Ptrn::Tup(tup) => assert_eq!(tup.elems.len(), 1),
                    other => panic!("expected tuple domain, got {:?}", other),
                }
            }
            other => panic!("expected abstraction, got {:?}", other),
        },
        other => panic!("expected nominal statement, got {:?}", other),
    }
}

#[test]
fn test_cn_has_bottom_codomain() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "cn k(x: int) { x }", "test.kp");
    assert_eq!(comp.num_errors(), 0);

    match &prg.stmts[0] {
        Stmt::Nom(stmt) => match &stmt.nom {
            Nom::Abs(abs) => {
                assert_eq!(abs.tag, FTag::Cn);
                assert!(matches!(*abs.codom, Expr::Bottom(_)));
                match &abs.dom {
                    // no synthesized parameter on continuations
                    Ptrn::Tup(tup) => assert_eq!(tup.elems.len(), 1),
                    other => panic!("expected tuple domain, got {:?}", other),
                }
            }
            other => panic!("expected abstraction, got {:?}", other),
        },
        other => panic!("expected nominal statement, got {:?}", other),
    }
}

#[test]
fn test_cn_with_codomain_is_an_error() {
    let mut comp = Comp::new();
    parse_source(&mut comp, "cn k(x: int) -> int { x }", "test.kp");
    assert_eq!(comp.num_errors(), 1);
    assert_eq!(
        comp.diagnostics()[0].get_error_name(),
        "ContinuationCodomain"
    );
}

#[test]
fn test_anonymous_abstraction_expression() {
    let expr = parse_expr_ok("\\ x, y = x");
    match expr {
        Expr::Abs(abs) => {
            assert_eq!(abs.abs.tag, FTag::DS);
            match &abs.abs.dom {
                Ptrn::Tup(tup) => assert_eq!(tup.elems.len(), 2),
                other => panic!("expected tuple domain, got {:?}", other),
            }
        }
        other => panic!("expected abstraction, got {:?}", other),
    }
}

#[test]
fn test_meta_pattern_on_abstraction() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "fn id[t](x: t) = x", "test.kp");
    assert_eq!(comp.num_errors(), 0);

    match &prg.stmts[0] {
        Stmt::Nom(stmt) => match &stmt.nom {
            Nom::Abs(abs) => assert!(abs.meta.is_some()),
            other => panic!("expected abstraction, got {:?}", other),
        },
        other => panic!("expected nominal statement, got {:?}", other),
    }
}

/*
 * literals and keys
 */

#[test]
fn test_literals() {
    match parse_expr_ok("42") {
        Expr::Lit(lit) => assert_eq!(lit.lit, Lit::U(42)),
        other => panic!("expected literal, got {:?}", other),
    }
    match parse_expr_ok("3.25") {
        Expr::Lit(lit) => assert_eq!(lit.lit, Lit::F(3.25)),
        other => panic!("expected literal, got {:?}", other),
    }
}

#[test]
fn test_key_expressions() {
    for source in ["true", "false", "type", "arity", "Arity", "marity", "Marity"] {
        match parse_expr_ok(source) {
            Expr::Key(_) => {}
            other => panic!("expected key expression for {:?}, got {:?}", source, other),
        }
    }
}

/*
 * error recovery and totality
 */

#[test]
fn test_match_is_reserved() {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, "match");
    assert_eq!(comp.num_errors(), 1);
    assert!(matches!(expr, Expr::Error(_)));
}

#[test]
fn test_missing_semicolon_recovers() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "let x = 42", "test.kp");
    assert_eq!(comp.num_errors(), 1);
    assert_eq!(prg.stmts.len(), 1);

    let message = comp.diagnostics()[0].kind().to_string();
    assert!(message.contains("the end of a let statement"));
    assert!(message.contains(";"));
}

#[test]
fn test_program_recovers_from_stray_tokens() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "42; let x = 1; )", "test.kp");
    // the stray literal and the stray paren each report once
    assert_eq!(comp.num_errors(), 2);
    assert_eq!(prg.stmts.len(), 1);
}

#[test]
fn test_parse_is_total_on_garbage() {
    for source in [
        "",
        ";;;",
        "((((",
        "fn",
        "fn f(x",
        "let",
        "let x: = ;",
        "}}{{",
        "pk(",
        "\\/",
        "let x = @#€;",
    ] {
        let mut comp = Comp::new();
        let _prg = parse_source(&mut comp, source, "test.kp");
        // no panic, and anything malformed was reported
        if !matches!(source, "" | ";;;") {
            assert!(comp.num_errors() > 0, "expected errors for {:?}", source);
        }
    }
}

#[test]
fn test_empty_program() {
    let mut comp = Comp::new();
    let prg = parse_source(&mut comp, "", "test.kp");
    assert_eq!(comp.num_errors(), 0);
    assert!(prg.stmts.is_empty());
}

#[test]
fn test_error_expression_keeps_position() {
    let mut comp = Comp::new();
    let expr = parse_expr_source(&mut comp, "let");
    // `let` cannot start an expression
    assert_eq!(comp.num_errors(), 1);
    assert!(matches!(expr, Expr::Error(_)));
}
