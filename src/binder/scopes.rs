use std::collections::HashMap;

use crate::{
    ast::ast::{Id, NodeId, Prg},
    comp::{Comp, Sym},
    errors::errors::ErrorImpl,
    Span,
};

/// A declaration site: an identifier pattern, an identifier binder or a
/// nominal. Lightweight so scope frames can hold copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub node: NodeId,
    pub sym: Sym,
    pub span: Span,
}

/// The binder's output: which declaration every resolved use refers to.
/// Uses of undeclared or anonymous names are simply absent.
#[derive(Debug, Default)]
pub struct Resolutions {
    uses: HashMap<NodeId, Decl>,
}

impl Resolutions {
    pub fn get(&self, use_node: NodeId) -> Option<&Decl> {
        self.uses.get(&use_node)
    }

    pub fn len(&self) -> usize {
        self.uses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }
}

/// The scope stack walked during binding. Each frame maps symbols to
/// their declaration; a `None` entry is a poisoned name, inserted after
/// an undeclared-identifier error so the same name does not produce a
/// second diagnostic in that scope.
pub struct Scopes<'c> {
    comp: &'c mut Comp,
    scopes: Vec<HashMap<Sym, Option<Decl>>>,
    resolutions: Resolutions,
}

impl<'c> Scopes<'c> {
    pub fn new(comp: &'c mut Comp) -> Self {
        Scopes {
            comp,
            scopes: vec![],
            resolutions: Resolutions::default(),
        }
    }

    pub fn comp(&mut self) -> &mut Comp {
        self.comp
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Adds a declaration to the innermost frame. Anonymous declarations
    /// are never inserted and may repeat freely; declaring a name twice
    /// in the same frame keeps the original and reports the newcomer.
    pub fn insert(&mut self, decl: Decl) {
        if self.comp.is_anonymous(decl.sym) {
            return;
        }

        let previous = self
            .scopes
            .last()
            .expect("scope stack is never empty during binding")
            .get(&decl.sym)
            .cloned();

        match previous {
            Some(Some(previous)) => {
                let name = self.comp.sym_str(decl.sym).to_string();
                self.comp.err(
                    decl.span.start.clone(),
                    ErrorImpl::Redefinition { name: name.clone() },
                );
                self.comp
                    .note(previous.span.start.clone(), ErrorImpl::PreviousDeclaration { name });
            }
            _ => {
                // fresh name, or overwriting a poisoned slot
                self.scopes
                    .last_mut()
                    .expect("scope stack is never empty during binding")
                    .insert(decl.sym, Some(decl));
            }
        }
    }

    /// Innermost-out lookup; the first frame containing the symbol wins.
    pub fn find(&self, sym: Sym) -> Option<Decl> {
        self.lookup(sym).and_then(|entry| entry.clone())
    }

    fn lookup(&self, sym: Sym) -> Option<&Option<Decl>> {
        for scope in self.scopes.iter().rev() {
            if let Some(entry) = scope.get(&sym) {
                return Some(entry);
            }
        }
        None
    }

    /// Resolves one identifier use. Anonymous uses are always an error;
    /// unknown names report once and poison the symbol in the current
    /// frame so further uses stay quiet.
    pub fn use_id(&mut self, use_node: NodeId, id: &Id) {
        if self.comp.is_anonymous(id.sym) {
            self.comp
                .err(id.span.start.clone(), ErrorImpl::AnonymousIdentifier);
            return;
        }

        let found = self.lookup(id.sym).cloned();
        match found {
            Some(Some(decl)) => {
                self.resolutions.uses.insert(use_node, decl);
            }
            Some(None) => {} // already reported in this scope
            None => {
                let name = self.comp.sym_str(id.sym).to_string();
                self.comp
                    .err(id.span.start.clone(), ErrorImpl::UndeclaredIdentifier { name });
                self.scopes
                    .last_mut()
                    .expect("scope stack is never empty during binding")
                    .insert(id.sym, None);
            }
        }
    }

    pub fn into_resolutions(self) -> Resolutions {
        debug_assert!(
            self.scopes.is_empty(),
            "every pushed scope must be popped by the end of binding"
        );
        self.resolutions
    }
}

/// Binds a whole program, resolving every identifier use in it.
pub fn bind(comp: &mut Comp, prg: &Prg) -> Resolutions {
    let mut scopes = Scopes::new(comp);
    prg.bind(&mut scopes);
    scopes.into_resolutions()
}
