// src/sema/analyzer/mod.rs

mod declarations;
mod errors;
mod expr;
mod stmt;

use crate::errors::SemanticError;
use crate::frontend::{Ast, BinaryOp, Interner, NodeId, NodeKind, Span, Symbol, TypeExpr, UnaryOp};
use crate::sema::compatibility::{needs_widening, types_equal};
use crate::sema::scope::Scope;
use crate::sema::std_env;
use crate::sema::types::Type;

/// A type error wrapping a miette-enabled SemanticError
#[derive(Debug, Clone)]
pub struct TypeError {
    pub error: SemanticError,
    pub span: Span,
}

impl TypeError {
    /// Create a new type error
    pub fn new(error: SemanticError, span: Span) -> Self {
        Self { error, span }
    }
}

/// Outcome of fitting an expression to a required type
pub(crate) enum Coercion {
    Ok,
    Incompatible,
}

/// Scope and type checker for one compilation.
///
/// One traversal over the arena decorates expression and variable nodes
/// with resolved types, links identifier occurrences to their
/// declarations, and splices widen nodes where an int implicitly converts
/// to float. Diagnostics are additive; the traversal never stops early.
#[derive(Default)]
pub struct Analyzer {
    scope: Scope,
    errors: Vec<TypeError>,
    /// Function declaration whose body is being checked
    current_function: Option<NodeId>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the program rooted at `program`, mutating the tree in place.
    ///
    /// The caller-supplied AST must have every parent link set (the parser
    /// establishes this). The interner is taken mutably so the seeded
    /// built-in names live in the same symbol space as user identifiers.
    #[tracing::instrument(skip(self, ast, interner))]
    pub fn analyze(
        &mut self,
        ast: &mut Ast,
        program: NodeId,
        interner: &mut Interner,
    ) -> Result<(), Vec<TypeError>> {
        self.seed_std_env(ast, interner);

        let NodeKind::Program { decls } = ast.kind(program) else {
            return Ok(());
        };
        let decls = decls.clone();
        for &decl in &decls {
            self.check_top_decl(ast, decl, interner);
        }
        self.check_main(ast, program, interner);

        tracing::debug!(errors = self.errors.len(), "semantic analysis complete");
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    fn check_top_decl(&mut self, ast: &mut Ast, decl: NodeId, interner: &Interner) {
        match ast.kind(decl) {
            NodeKind::Function { name, .. } => {
                let name = *name;
                self.check_function(ast, decl, name, interner);
            }
            NodeKind::GlobalVar { .. } => self.check_var_decl(ast, decl, interner),
            _ => {}
        }
    }

    /// The program must contain a function literally named "main", with
    /// return type int (the latter is checked at its declaration).
    fn check_main(&mut self, ast: &Ast, program: NodeId, interner: &mut Interner) {
        let main = interner.intern("main");
        let is_function = self
            .scope
            .get(main)
            .is_some_and(|decl| matches!(ast.kind(decl), NodeKind::Function { .. }));
        if !is_function {
            self.add_error(
                SemanticError::MainMissing {
                    span: ast.span(program).into(),
                },
                ast.span(program),
            );
        }
    }

    fn push_scope(&mut self) {
        let parent = std::mem::take(&mut self.scope);
        self.scope = Scope::with_parent(parent);
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = std::mem::take(&mut self.scope).into_parent() {
            self.scope = parent;
        }
    }

    /// Bind a declaration in the innermost scope, reporting a
    /// redeclaration if that level already binds the name. Shadowing an
    /// outer level is fine.
    fn declare(&mut self, ast: &Ast, name: Symbol, decl: NodeId, interner: &Interner) {
        if self.scope.get_local(name).is_some() {
            self.add_error(
                SemanticError::Redeclared {
                    name: interner.resolve(name).to_string(),
                    span: ast.span(decl).into(),
                },
                ast.span(decl),
            );
        }
        self.scope.define(name, decl);
    }

    /// Declared type of a checked declaration node. Falls back to the
    /// syntactic annotation for a declaration whose own check is still in
    /// flight (`int x = x;` resolves the inner `x` this way).
    fn decl_type(&self, ast: &Ast, decl: NodeId) -> Type {
        if let Some(ty) = ast.ty(decl) {
            return ty.clone();
        }
        match ast.kind(decl) {
            NodeKind::GlobalVar { ty, .. }
            | NodeKind::LocalVar { ty, .. }
            | NodeKind::Param { ty, .. } => Type::from_type_expr(ty),
            NodeKind::Function { return_ty, .. } => Type::from_type_expr(return_ty),
            _ => Type::Error,
        }
    }

    /// Fit `expr` (already typed as `found`) to a slot requiring
    /// `expected`, splicing a widen node for the one permitted implicit
    /// conversion. Error on either side absorbs quietly so one root cause
    /// reports once.
    pub(crate) fn coerce(
        &mut self,
        ast: &mut Ast,
        expr: NodeId,
        found: &Type,
        expected: &Type,
    ) -> Coercion {
        if found.is_error() || expected.is_error() {
            return Coercion::Ok;
        }
        if types_equal(found, expected) {
            return Coercion::Ok;
        }
        if needs_widening(found, expected) {
            self.widen(ast, expr);
            return Coercion::Ok;
        }
        Coercion::Incompatible
    }

    /// Wrap `expr` in a synthetic int-to-float node. The widen node takes
    /// the expression's slot in its parent and becomes the expression's
    /// new parent.
    pub(crate) fn widen(&mut self, ast: &mut Ast, expr: NodeId) -> NodeId {
        let span = ast.span(expr);
        let parent = ast.parent(expr);
        let widen = ast.alloc(NodeKind::IntToFloat(expr), span);
        ast.node_mut(widen).parent = parent;
        ast.set_ty(widen, Type::Float);
        if let Some(parent) = parent {
            ast.replace_child(parent, expr, widen);
        }
        widen
    }

    /// Register the built-in I/O functions in the global scope so call
    /// resolution treats them exactly like user functions.
    fn seed_std_env(&mut self, ast: &mut Ast, interner: &mut Interner) {
        for (name, func) in std_env::seed(ast, interner) {
            self.scope.define(name, func);
        }
    }
}
