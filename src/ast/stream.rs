//! Textual rendering of the AST.
//!
//! Operators print fully parenthesized by default, so re-parsing the
//! output of an error-free expression rebuilds the same tree shape; the
//! `fancy` option drops those grouping parentheses for human eyes.

use crate::comp::Comp;

use super::{
    ast::{FTag, Id, Prg},
    expressions::{BlockExpr, Expr, Lit, TupElem, TupExpr},
    patterns::{Bndr, Ptrn},
    statements::{AbsNom, Nom, Stmt},
};

pub struct Printer<'c> {
    comp: &'c Comp,
    out: String,
    indent: usize,
}

impl<'c> Printer<'c> {
    pub fn new(comp: &'c Comp) -> Self {
        Printer {
            comp,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn w(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn nl(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn grouping(&self) -> bool {
        !self.comp.fancy
    }
}

impl Prg {
    pub fn stream(&self, p: &mut Printer) {
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                p.nl();
            }
            stmt.stream(p);
        }
        p.w("\n");
    }
}

impl Id {
    pub fn stream(&self, p: &mut Printer) {
        let spelling = p.comp.sym_str(self.sym).to_string();
        p.w(&spelling);
    }
}

/*
 * Ptrn / Bndr
 */

impl Ptrn {
    pub fn stream(&self, p: &mut Printer) {
        match self {
            Ptrn::Id(ptrn) => {
                if ptrn.is_mut {
                    p.w("mut ");
                }
                ptrn.id.stream(p);
                if !ptrn.ty.is_unknown() {
                    p.w(": ");
                    ptrn.ty.stream(p);
                }
            }
            Ptrn::Tup(ptrn) => {
                p.w("(");
                stream_ptrn_elems(&ptrn.elems, p);
                p.w(")");
            }
            Ptrn::Error(_) => p.w("<error pattern>"),
        }
    }
}

fn stream_ptrn_elems(elems: &[Ptrn], p: &mut Printer) {
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            p.w(", ");
        }
        elem.stream(p);
    }
}

impl Bndr {
    pub fn stream(&self, p: &mut Printer) {
        match self {
            Bndr::Id(bndr) => {
                if !bndr.id.is_anonymous(p.comp) {
                    bndr.id.stream(p);
                    p.w(": ");
                }
                bndr.ty.stream(p);
            }
            Bndr::Sig(bndr) => {
                p.w("[");
                stream_bndrs(&bndr.elems, p);
                p.w("]");
            }
            Bndr::Error(_) => p.w("<error binder>"),
        }
    }
}

fn stream_bndrs(bndrs: &[Bndr], p: &mut Printer) {
    for (i, bndr) in bndrs.iter().enumerate() {
        if i > 0 {
            p.w(", ");
        }
        bndr.stream(p);
    }
}

/*
 * Nom
 */

impl Nom {
    pub fn stream(&self, p: &mut Printer) {
        match self {
            Nom::Abs(nom) => nom.stream(p),
            Nom::Nom(nom) => {
                p.w("nom ");
                nom.id.stream(p);
                p.w(": ");
                nom.ty.stream(p);
                p.w(" = ");
                nom.body.stream(p);
            }
            Nom::Sig(nom) => {
                p.w(nom.tag.spelling());
                p.w(" ");
                nom.id.stream(p);
                p.w(" {}");
            }
        }
    }
}

impl AbsNom {
    pub fn stream(&self, p: &mut Printer) {
        p.w(self.tag.abs_spelling());
        if !self.id.is_anonymous(p.comp) {
            p.w(" ");
            self.id.stream(p);
        }
        if let Some(meta) = &self.meta {
            match meta {
                Ptrn::Tup(tup) => {
                    p.w("[");
                    stream_ptrn_elems(&tup.elems, p);
                    p.w("]");
                }
                other => other.stream(p),
            }
        }
        self.dom.stream(p);
        self.stream_codom_and_body(p);
    }

    /// Abstractions in expression position have no name and take their
    /// domain without parentheses.
    pub fn stream_as_expr(&self, p: &mut Printer) {
        p.w(self.tag.abs_spelling());
        p.w(" ");
        match &self.dom {
            Ptrn::Tup(tup) => stream_ptrn_elems(&tup.elems, p),
            other => other.stream(p),
        }
        self.stream_codom_and_body(p);
    }

    fn stream_codom_and_body(&self, p: &mut Printer) {
        // the ⊥ codomain of continuation-passing shapes is implicit
        if !self.codom.is_unknown() && !matches!(*self.codom, Expr::Bottom(_)) {
            p.w(" -> ");
            self.codom.stream(p);
        }
        match &*self.body {
            Expr::Block(block) => {
                p.w(" ");
                block.stream(p);
            }
            body => {
                p.w(" = ");
                body.stream(p);
            }
        }
    }
}

/*
 * Stmt
 */

impl Stmt {
    pub fn stream(&self, p: &mut Printer) {
        match self {
            Stmt::Expr(stmt) => {
                stmt.expr.stream(p);
                p.w(";");
            }
            Stmt::Assign(stmt) => {
                stmt.lhs.stream(p);
                p.w(" ");
                p.w(stmt.op.spelling());
                p.w(" ");
                stmt.rhs.stream(p);
                p.w(";");
            }
            Stmt::Let(stmt) => {
                p.w("let ");
                stmt.ptrn.stream(p);
                if let Some(init) = &stmt.init {
                    p.w(" = ");
                    init.stream(p);
                }
                p.w(";");
            }
            Stmt::Nom(stmt) => stmt.nom.stream(p),
        }
    }
}

/*
 * Expr
 */

impl BlockExpr {
    pub fn stream(&self, p: &mut Printer) {
        p.w("{");
        p.indent += 1;
        for stmt in &self.stmts {
            p.nl();
            stmt.stream(p);
        }
        if !self.expr.is_unit_tup() {
            p.nl();
            self.expr.stream(p);
        }
        p.indent -= 1;
        p.nl();
        p.w("}");
    }
}

impl TupExpr {
    pub fn stream(&self, p: &mut Printer) {
        self.stream_delimited(p, "(", ")");
    }

    fn stream_delimited(&self, p: &mut Printer, delim_l: &str, delim_r: &str) {
        p.w(delim_l);
        for (i, elem) in self.elems.iter().enumerate() {
            if i > 0 {
                p.w(", ");
            }
            elem.stream(p);
        }
        // a single positional element needs the trailing comma to stay a
        // tuple under re-parsing
        if self.elems.len() == 1
            && self.elems[0].id.is_anonymous(p.comp)
            && self.ty.is_unknown()
            && delim_l == "("
        {
            p.w(",");
        }
        p.w(delim_r);
        if !self.ty.is_unknown() {
            p.w(": ");
            self.ty.stream(p);
        }
    }
}

impl TupElem {
    pub fn stream(&self, p: &mut Printer) {
        if !self.id.is_anonymous(p.comp) {
            self.id.stream(p);
            p.w("= ");
        }
        self.expr.stream(p);
    }
}

impl Expr {
    pub fn stream(&self, p: &mut Printer) {
        match self {
            Expr::Abs(expr) => expr.abs.stream_as_expr(p),
            Expr::App(expr) => {
                expr.callee.stream(p);
                match expr.tag {
                    FTag::DS => expr.arg.stream_delimited(p, "[", "]"),
                    FTag::Fn => expr.arg.stream_delimited(p, "(", ")"),
                    FTag::Cn => expr.arg.stream_delimited(p, "![", "]"),
                }
            }
            Expr::Ar(expr) => {
                p.w("ar[");
                stream_bndrs(&expr.doms, p);
                p.w("; ");
                expr.body.stream(p);
                p.w("]");
            }
            Expr::Block(expr) => expr.stream(p),
            Expr::Bottom(_) => p.w("⊥"),
            Expr::Error(_) => p.w("<error expression>"),
            Expr::Field(expr) => {
                expr.lhs.stream(p);
                p.w(".");
                expr.id.stream(p);
            }
            Expr::For(expr) => {
                p.w("for ");
                match &expr.ptrn {
                    Ptrn::Tup(tup) => stream_ptrn_elems(&tup.elems, p),
                    other => other.stream(p),
                }
                p.w(" in ");
                expr.expr.stream(p);
                p.w(" ");
                expr.body.stream(p);
            }
            Expr::Id(expr) => expr.id.stream(p),
            Expr::If(expr) => {
                p.w("if ");
                expr.cond.stream(p);
                p.w(" ");
                expr.then_expr.stream(p);
                match &*expr.else_expr {
                    Expr::Block(block) if block.stmts.is_empty() && block.expr.is_unit_tup() => {}
                    else_expr => {
                        p.w(" else ");
                        else_expr.stream(p);
                    }
                }
            }
            Expr::Infix(expr) => {
                if p.grouping() {
                    p.w("(");
                }
                expr.lhs.stream(p);
                p.w(" ");
                p.w(expr.op.spelling());
                p.w(" ");
                expr.rhs.stream(p);
                if p.grouping() {
                    p.w(")");
                }
            }
            Expr::Key(expr) => {
                let spelling = p.comp.sym_str(expr.sym).to_string();
                p.w(&spelling);
            }
            Expr::Lit(expr) => match expr.lit {
                Lit::S(s) => p.w(&s.to_string()),
                Lit::U(u) => p.w(&u.to_string()),
                // {:?} keeps the decimal point, so the literal stays a float
                Lit::F(f) => p.w(&format!("{:?}", f)),
            },
            Expr::Pi(expr) => {
                p.w(expr.tag.pi_spelling());
                p.w(" ");
                expr.dom.stream(p);
                if expr.tag != FTag::Cn {
                    p.w(" -> ");
                    expr.codom.stream(p);
                }
            }
            Expr::Pk(expr) => {
                p.w("pk(");
                stream_bndrs(&expr.doms, p);
                p.w("; ");
                expr.body.stream(p);
                p.w(")");
            }
            Expr::Postfix(expr) => {
                if p.grouping() {
                    p.w("(");
                }
                expr.lhs.stream(p);
                p.w(expr.op.spelling());
                if p.grouping() {
                    p.w(")");
                }
            }
            Expr::Prefix(expr) => {
                if p.grouping() {
                    p.w("(");
                }
                p.w(expr.op.spelling());
                expr.rhs.stream(p);
                if p.grouping() {
                    p.w(")");
                }
            }
            Expr::Sigma(expr) => {
                p.w("[");
                stream_bndrs(&expr.elems, p);
                p.w("]");
            }
            Expr::Tup(expr) => expr.stream(p),
            Expr::Unknown(_) => p.w("<?>"),
            Expr::While(expr) => {
                p.w("while ");
                expr.cond.stream(p);
                p.w(" ");
                expr.body.stream(p);
            }
        }
    }
}
