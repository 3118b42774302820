// src/sema/analyzer/declarations.rs
//! Function, variable and parameter declaration checks.

use super::*;

impl Analyzer {
    /// Check a function declaration. The name goes into the *enclosing*
    /// scope before the body is visited, so a function can call itself and
    /// anything declared earlier at global level; parameters get their own
    /// scope, and the body block opens a further one for locals.
    pub(super) fn check_function(
        &mut self,
        ast: &mut Ast,
        func: NodeId,
        name: Symbol,
        interner: &Interner,
    ) {
        self.declare(ast, name, func, interner);

        let NodeKind::Function {
            params,
            return_ty,
            body,
            ..
        } = ast.kind(func)
        else {
            return;
        };
        let params = params.clone();
        let body = *body;
        let return_type = Type::from_type_expr(return_ty);
        ast.set_ty(func, return_type.clone());

        if interner.resolve(name) == "main" && return_type != Type::Int {
            self.add_error(
                SemanticError::MainReturnNotInt {
                    span: ast.span(func).into(),
                },
                ast.span(func),
            );
        }

        self.push_scope();
        for &param in &params {
            self.check_param(ast, param, interner);
        }
        let enclosing = self.current_function.replace(func);
        self.check_block(ast, body, interner);
        self.current_function = enclosing;
        self.pop_scope();

        if return_type != Type::Void && !self.guarantees_return(ast, body) {
            self.add_error(
                SemanticError::MissingReturn {
                    name: interner.resolve(name).to_string(),
                    span: ast.span(func).into(),
                },
                ast.span(func),
            );
        }
    }

    pub(super) fn check_param(&mut self, ast: &mut Ast, param: NodeId, interner: &Interner) {
        let NodeKind::Param { name, ty } = ast.kind(param) else {
            return;
        };
        let name = *name;
        let ty = ty.clone();
        self.declare(ast, name, param, interner);

        let resolved = self.resolve_declared(&ty, name, ast.span(param), interner);
        ast.set_ty(param, resolved);
    }

    /// Resolve a declared annotation, reporting the illegal void forms.
    /// A flagged declaration decorates as Error so its uses stay quiet.
    fn resolve_declared(
        &mut self,
        ty: &TypeExpr,
        name: Symbol,
        span: Span,
        interner: &Interner,
    ) -> Type {
        let resolved = Type::from_type_expr(ty);
        match resolved {
            Type::Void => {
                self.add_error(
                    SemanticError::DeclaredVoid {
                        name: interner.resolve(name).to_string(),
                        span: span.into(),
                    },
                    span,
                );
                Type::Error
            }
            Type::Array { ref elem, .. } if matches!(**elem, Type::Void) => {
                self.add_error(
                    SemanticError::DeclaredVoidArray {
                        name: interner.resolve(name).to_string(),
                        span: span.into(),
                    },
                    span,
                );
                Type::Error
            }
            other => other,
        }
    }

    /// Check a global or local variable declaration: redeclaration, void
    /// forms, array sizing, and the initializer.
    pub(super) fn check_var_decl(&mut self, ast: &mut Ast, decl: NodeId, interner: &Interner) {
        let (name, ty, init) = match ast.kind(decl) {
            NodeKind::GlobalVar { name, ty, init } | NodeKind::LocalVar { name, ty, init } => {
                (*name, ty.clone(), *init)
            }
            _ => return,
        };
        self.declare(ast, name, decl, interner);

        let span = ast.span(decl);
        let resolved = self.resolve_declared(&ty, name, span, interner);

        // empty brackets need a brace initializer to infer a length from
        if let Type::Array { size: None, .. } = &resolved {
            let has_brace_init =
                init.is_some_and(|e| matches!(ast.kind(e), NodeKind::ArrayInit { .. }));
            if !has_brace_init {
                self.add_error(
                    SemanticError::ArraySizeMissing {
                        name: interner.resolve(name).to_string(),
                        span: span.into(),
                    },
                    span,
                );
            }
        }
        ast.set_ty(decl, resolved.clone());

        if let Some(init) = init {
            let final_ty = self.check_initializer(ast, name, resolved, init, interner);
            // size inference rebinds the declared type, exactly once
            ast.set_ty(decl, final_ty);
        }
    }

    /// Check a declaration's initializer against the declared type and
    /// return the (possibly size-inferred) type to rebind.
    fn check_initializer(
        &mut self,
        ast: &mut Ast,
        name: Symbol,
        declared: Type,
        init: NodeId,
        interner: &Interner,
    ) -> Type {
        let is_brace = matches!(ast.kind(init), NodeKind::ArrayInit { .. });
        match declared {
            Type::Array { elem, size } if is_brace => {
                let elem = *elem;
                let NodeKind::ArrayInit { elems } = ast.kind(init) else {
                    return Type::Array {
                        elem: Box::new(elem),
                        size,
                    };
                };
                let elems = elems.clone();

                for &element in &elems {
                    let element_ty = self.check_expr(ast, element, interner);
                    if let Coercion::Incompatible = self.coerce(ast, element, &element_ty, &elem) {
                        self.add_error(
                            SemanticError::InitElementIncompatible {
                                span: ast.span(element).into(),
                            },
                            ast.span(element),
                        );
                    }
                }

                let count = elems.len() as u32;
                ast.set_ty(
                    init,
                    Type::Array {
                        elem: Box::new(elem.clone()),
                        size: Some(count),
                    },
                );
                match size {
                    Some(declared_size) => {
                        if count > declared_size {
                            self.add_error(
                                SemanticError::ExcessInitElements {
                                    span: ast.span(init).into(),
                                },
                                ast.span(init),
                            );
                        }
                        Type::Array {
                            elem: Box::new(elem),
                            size,
                        }
                    }
                    // back-fill the pending size from the list length
                    None => Type::Array {
                        elem: Box::new(elem),
                        size: Some(count),
                    },
                }
            }
            declared @ Type::Array { .. } => {
                self.check_expr(ast, init, interner);
                let span = ast.span(init);
                self.add_error(
                    SemanticError::ScalarInitForArray {
                        name: interner.resolve(name).to_string(),
                        span: span.into(),
                    },
                    span,
                );
                declared
            }
            declared if is_brace => {
                // still type the elements for decoration
                self.check_expr(ast, init, interner);
                if !declared.is_error() {
                    let span = ast.span(init);
                    self.add_error(
                        SemanticError::InitForScalar {
                            name: interner.resolve(name).to_string(),
                            span: span.into(),
                        },
                        span,
                    );
                }
                declared
            }
            declared => {
                let init_ty = self.check_expr(ast, init, interner);
                if let Coercion::Incompatible = self.coerce(ast, init, &init_ty, &declared) {
                    let span = ast.span(init);
                    self.add_error(
                        SemanticError::AssignIncompatible { span: span.into() },
                        span,
                    );
                }
                declared
            }
        }
    }
}
