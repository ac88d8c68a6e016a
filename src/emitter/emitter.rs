use std::collections::HashMap;

use crate::{
    ast::{
        ast::{NodeId, Prg},
        expressions::{BlockExpr, Expr},
        patterns::Ptrn,
        statements::{Nom, Stmt},
    },
    binder::scopes::Resolutions,
    comp::Comp,
};

/// Placeholder handle into the intermediate representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Def(u32);

pub struct Emitter<'c> {
    comp: &'c Comp,
    resolutions: &'c Resolutions,
    /// Def slot per declaration node, filled at most once.
    defs: HashMap<NodeId, Def>,
    next_def: u32,
}

impl<'c> Emitter<'c> {
    pub fn new(comp: &'c Comp, resolutions: &'c Resolutions) -> Self {
        Emitter {
            comp,
            resolutions,
            defs: HashMap::new(),
            next_def: 0,
        }
    }

    pub fn comp(&self) -> &Comp {
        self.comp
    }

    fn fresh(&mut self) -> Def {
        let def = Def(self.next_def);
        self.next_def += 1;
        def
    }

    pub fn def_of(&self, node: NodeId) -> Option<Def> {
        self.defs.get(&node).copied()
    }

    pub fn emit_prg(&mut self, prg: &Prg) {
        self.emit_stmts(&prg.stmts);
    }

    /// Mirrors the binder's statement discipline: every nominal in a run
    /// is forward-declared before any body is lowered.
    pub fn emit_stmts(&mut self, stmts: &[Stmt]) {
        let mut i = 0;
        while i < stmts.len() {
            if matches!(stmts[i], Stmt::Nom(_)) {
                let mut j = i;
                while j < stmts.len() && matches!(stmts[j], Stmt::Nom(_)) {
                    j += 1;
                }
                for stmt in &stmts[i..j] {
                    if let Stmt::Nom(nom_stmt) = stmt {
                        nom_stmt.nom.emit_nom(self);
                    }
                }
                for stmt in &stmts[i..j] {
                    if let Stmt::Nom(nom_stmt) = stmt {
                        nom_stmt.nom.emit(self);
                    }
                }
                i = j;
            } else {
                stmts[i].emit(self);
                i += 1;
            }
        }
    }
}

impl Nom {
    /// Phase one: reserve a def so sibling bodies can refer to it.
    pub fn emit_nom(&self, e: &mut Emitter) {
        let def = e.fresh();
        e.defs.insert(self.node(), def);
    }

    /// Phase two: lower the body against the reserved defs.
    pub fn emit(&self, e: &mut Emitter) {
        match self {
            Nom::Abs(nom) => {
                nom.dom.emit(e);
                let _ = nom.body.emit(e);
            }
            Nom::Nom(nom) => {
                let _ = nom.body.emit(e);
            }
            Nom::Sig(_) => {}
        }
    }
}

impl Ptrn {
    pub fn emit(&self, e: &mut Emitter) {
        match self {
            Ptrn::Id(ptrn) => {
                let def = e.fresh();
                e.defs.insert(ptrn.node, def);
            }
            Ptrn::Tup(ptrn) => {
                for elem in &ptrn.elems {
                    elem.emit(e);
                }
            }
            Ptrn::Error(_) => {}
        }
    }
}

impl Stmt {
    pub fn emit(&self, e: &mut Emitter) {
        match self {
            Stmt::Expr(stmt) => {
                let _ = stmt.expr.emit(e);
            }
            Stmt::Assign(stmt) => {
                let _ = stmt.lhs.emit(e);
                let _ = stmt.rhs.emit(e);
            }
            Stmt::Let(stmt) => {
                if let Some(init) = &stmt.init {
                    let _ = init.emit(e);
                }
                stmt.ptrn.emit(e);
            }
            Stmt::Nom(stmt) => {
                stmt.nom.emit_nom(e);
                stmt.nom.emit(e);
            }
        }
    }
}

impl BlockExpr {
    pub fn emit(&self, e: &mut Emitter) -> Option<Def> {
        e.emit_stmts(&self.stmts);
        self.expr.emit(e)
    }
}

impl Expr {
    /// Lowers one expression; placeholder defs only for now.
    pub fn emit(&self, e: &mut Emitter) -> Option<Def> {
        match self {
            Expr::Id(expr) => {
                // resolved by the binder; unresolved uses lower to nothing
                let decl = e.resolutions.get(expr.node)?;
                e.def_of(decl.node)
            }
            Expr::Block(expr) => expr.emit(e),
            Expr::App(expr) => {
                let _ = expr.callee.emit(e);
                for elem in &expr.arg.elems {
                    let _ = elem.expr.emit(e);
                }
                None
            }
            Expr::Abs(expr) => {
                expr.abs.dom.emit(e);
                let _ = expr.abs.body.emit(e);
                None
            }
            Expr::If(expr) => {
                let _ = expr.cond.emit(e);
                let _ = expr.then_expr.emit(e);
                let _ = expr.else_expr.emit(e);
                None
            }
            Expr::While(expr) => {
                let _ = expr.cond.emit(e);
                let _ = expr.body.emit(e);
                None
            }
            Expr::For(expr) => {
                let _ = expr.expr.emit(e);
                expr.ptrn.emit(e);
                let _ = expr.body.emit(e);
                None
            }
            Expr::Infix(expr) => {
                let _ = expr.lhs.emit(e);
                let _ = expr.rhs.emit(e);
                None
            }
            Expr::Prefix(expr) => {
                let _ = expr.rhs.emit(e);
                None
            }
            Expr::Postfix(expr) => {
                let _ = expr.lhs.emit(e);
                None
            }
            Expr::Field(expr) => {
                let _ = expr.lhs.emit(e);
                None
            }
            Expr::Tup(expr) => {
                for elem in &expr.elems {
                    let _ = elem.expr.emit(e);
                }
                None
            }
            Expr::Pk(expr) => {
                let _ = expr.body.emit(e);
                None
            }
            Expr::Ar(expr) => {
                let _ = expr.body.emit(e);
                None
            }
            Expr::Pi(_)
            | Expr::Sigma(_)
            | Expr::Key(_)
            | Expr::Lit(_)
            | Expr::Bottom(_)
            | Expr::Unknown(_)
            | Expr::Error(_) => None,
        }
    }
}
