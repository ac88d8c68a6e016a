//! The bind traversal: per-node-kind resolution rules.
//!
//! Children bind left to right; a node opens a scope only where the
//! language introduces one (blocks, abstractions, dependent types).
//! Runs of adjacent nominal statements bind in two phases — declare all,
//! then bind all bodies — which is what lets siblings refer to each
//! other regardless of order.

use crate::ast::{
    ast::Prg,
    expressions::{BlockExpr, Expr, TupExpr},
    patterns::{Bndr, IdBndr, IdPtrn, Ptrn},
    statements::{AbsNom, Nom, Stmt},
};

use super::scopes::{Decl, Scopes};

impl Prg {
    pub fn bind(&self, s: &mut Scopes) {
        s.push();
        bind_stmts(s, &self.stmts);
        s.pop();
    }
}

/// Binds a statement sequence. Maximal runs of adjacent nominal
/// statements are declared first and bound second; everything else
/// binds eagerly in order.
pub fn bind_stmts(s: &mut Scopes, stmts: &[Stmt]) {
    let mut i = 0;
    while i < stmts.len() {
        if matches!(stmts[i], Stmt::Nom(_)) {
            let mut j = i;
            while j < stmts.len() && matches!(stmts[j], Stmt::Nom(_)) {
                j += 1;
            }
            for stmt in &stmts[i..j] {
                if let Stmt::Nom(nom_stmt) = stmt {
                    s.insert(nom_stmt.nom.decl());
                }
            }
            for stmt in &stmts[i..j] {
                if let Stmt::Nom(nom_stmt) = stmt {
                    nom_stmt.nom.bind(s);
                }
            }
            i = j;
        } else {
            stmts[i].bind(s);
            i += 1;
        }
    }
}

/*
 * Stmt
 */

impl Stmt {
    pub fn bind(&self, s: &mut Scopes) {
        match self {
            Stmt::Expr(stmt) => stmt.expr.bind(s),
            Stmt::Assign(stmt) => {
                stmt.lhs.bind(s);
                stmt.rhs.bind(s);
            }
            Stmt::Let(stmt) => {
                // the initializer sees the scope before the pattern's names
                if let Some(init) = &stmt.init {
                    init.bind(s);
                }
                stmt.ptrn.bind(s);
            }
            Stmt::Nom(stmt) => {
                // single-statement path; runs go through bind_stmts
                s.insert(stmt.nom.decl());
                stmt.nom.bind(s);
            }
        }
    }
}

/*
 * Nom
 */

impl Nom {
    pub fn decl(&self) -> Decl {
        Decl {
            node: self.node(),
            sym: self.id().sym,
            span: self.id().span.clone(),
        }
    }

    /// Binds the declaration's innards. The name itself was already
    /// inserted into the enclosing scope by [`bind_stmts`].
    pub fn bind(&self, s: &mut Scopes) {
        match self {
            Nom::Abs(nom) => bind_abs(nom, s),
            Nom::Nom(nom) => {
                nom.ty.bind(s);
                nom.body.bind(s);
            }
            Nom::Sig(_) => {}
        }
    }
}

/// Scope discipline of an abstraction: its own name is visible inside
/// (for recursion), the domain binds before the codomain (dependent
/// codomains see the parameters) and the body sees everything.
fn bind_abs(abs: &AbsNom, s: &mut Scopes) {
    s.push();
    s.insert(Decl {
        node: abs.node,
        sym: abs.id.sym,
        span: abs.id.span.clone(),
    });
    if let Some(meta) = &abs.meta {
        meta.bind(s);
    }
    abs.dom.bind(s);
    abs.codom.bind(s);
    abs.body.bind(s);
    s.pop();
}

/*
 * Ptrn
 */

impl IdPtrn {
    pub fn decl(&self) -> Decl {
        Decl {
            node: self.node,
            sym: self.id.sym,
            span: self.id.span.clone(),
        }
    }
}

impl Ptrn {
    /// The ascription binds before the name is inserted, so a pattern
    /// cannot name itself in its own type.
    pub fn bind(&self, s: &mut Scopes) {
        match self {
            Ptrn::Id(ptrn) => {
                ptrn.ty.bind(s);
                s.insert(ptrn.decl());
            }
            Ptrn::Tup(ptrn) => {
                for elem in &ptrn.elems {
                    elem.bind(s);
                }
            }
            Ptrn::Error(_) => {}
        }
    }
}

/*
 * Bndr
 */

impl IdBndr {
    pub fn decl(&self) -> Decl {
        Decl {
            node: self.node,
            sym: self.id.sym,
            span: self.id.span.clone(),
        }
    }
}

impl Bndr {
    /// Inserts the binder's declarations into the scope the *caller*
    /// pushed. The type binds first — in the scope as it exists before
    /// this binder's own name — then the name becomes visible, so each
    /// successive binder in a dependent list sees all earlier ones but
    /// never itself.
    pub fn infiltrate(&self, s: &mut Scopes) {
        match self {
            Bndr::Id(bndr) => {
                bndr.ty.bind(s);
                s.insert(bndr.decl());
            }
            Bndr::Sig(bndr) => {
                for elem in &bndr.elems {
                    elem.infiltrate(s);
                }
            }
            Bndr::Error(_) => {}
        }
    }
}

/*
 * Expr
 */

impl BlockExpr {
    pub fn bind(&self, s: &mut Scopes) {
        s.push();
        bind_stmts(s, &self.stmts);
        self.expr.bind(s);
        s.pop();
    }
}

impl TupExpr {
    pub fn bind(&self, s: &mut Scopes) {
        for elem in &self.elems {
            elem.expr.bind(s);
        }
        self.ty.bind(s);
    }
}

impl Expr {
    pub fn bind(&self, s: &mut Scopes) {
        match self {
            Expr::Bottom(_) | Expr::Error(_) | Expr::Key(_) | Expr::Lit(_) | Expr::Unknown(_) => {}
            Expr::Id(expr) => s.use_id(expr.node, &expr.id),
            Expr::Abs(expr) => bind_abs(&expr.abs, s),
            Expr::App(expr) => {
                expr.callee.bind(s);
                expr.arg.bind(s);
            }
            Expr::Field(expr) => expr.lhs.bind(s),
            Expr::Prefix(expr) => expr.rhs.bind(s),
            Expr::Postfix(expr) => expr.lhs.bind(s),
            Expr::Infix(expr) => {
                expr.lhs.bind(s);
                expr.rhs.bind(s);
            }
            Expr::Tup(expr) => expr.bind(s),
            Expr::Block(expr) => expr.bind(s),
            Expr::If(expr) => {
                expr.cond.bind(s);
                expr.then_expr.bind(s);
                expr.else_expr.bind(s);
            }
            Expr::While(expr) => {
                expr.cond.bind(s);
                expr.body.bind(s);
            }
            Expr::For(expr) => {
                // the iterated expression cannot see the loop pattern
                expr.expr.bind(s);
                s.push();
                expr.ptrn.bind(s);
                expr.body.bind(s);
                s.pop();
            }
            Expr::Pi(expr) => {
                s.push();
                expr.dom.infiltrate(s);
                expr.codom.bind(s);
                s.pop();
            }
            Expr::Sigma(expr) => {
                s.push();
                for elem in &expr.elems {
                    elem.infiltrate(s);
                }
                s.pop();
            }
            Expr::Pk(expr) => {
                s.push();
                for dom in &expr.doms {
                    dom.infiltrate(s);
                }
                expr.body.bind(s);
                s.pop();
            }
            Expr::Ar(expr) => {
                s.push();
                for dom in &expr.doms {
                    dom.infiltrate(s);
                }
                expr.body.bind(s);
                s.pop();
            }
        }
    }
}
