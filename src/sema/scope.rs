// src/sema/scope.rs

use crate::frontend::{NodeId, Symbol};
use rustc_hash::FxHashMap;

/// One lexical scope level, chained to its enclosing level. Bindings map an
/// identifier to the arena node of its declaration.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: FxHashMap<Symbol, NodeId>,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Scope) -> Self {
        Self {
            symbols: FxHashMap::default(),
            parent: Some(Box::new(parent)),
        }
    }

    /// Bind `name` in this innermost level, silently overwriting any
    /// existing binding at the same level. Callers pre-check redeclaration
    /// with [`Scope::get_local`].
    pub fn define(&mut self, name: Symbol, decl: NodeId) {
        self.symbols.insert(name, decl);
    }

    /// Look `name` up in this level only. Used for redeclaration checks;
    /// shadowing an outer level is never a redeclaration.
    pub fn get_local(&self, name: Symbol) -> Option<NodeId> {
        self.symbols.get(&name).copied()
    }

    /// Look `name` up from this level outward, returning the nearest
    /// binding. `None` is a normal result the caller handles.
    pub fn get(&self, name: Symbol) -> Option<NodeId> {
        self.symbols
            .get(&name)
            .copied()
            .or_else(|| self.parent.as_ref().and_then(|p| p.get(name)))
    }

    pub fn into_parent(self) -> Option<Scope> {
        self.parent.map(|b| *b)
    }
}
