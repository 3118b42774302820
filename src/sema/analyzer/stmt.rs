// src/sema/analyzer/stmt.rs

use super::*;

impl Analyzer {
    /// Check a compound statement. Blocks open their own scope; local
    /// declarations precede the statement list. A return followed by
    /// further statements in the same sequence flags the first unreachable
    /// statement, once.
    pub(super) fn check_block(&mut self, ast: &mut Ast, block: NodeId, interner: &Interner) {
        let NodeKind::Block { decls, stmts } = ast.kind(block) else {
            return;
        };
        let decls = decls.clone();
        let stmts = stmts.clone();

        self.push_scope();
        for &decl in &decls {
            self.check_var_decl(ast, decl, interner);
        }
        let mut reported_unreachable = false;
        for (i, &stmt) in stmts.iter().enumerate() {
            self.check_stmt(ast, stmt, interner);
            if !reported_unreachable
                && matches!(ast.kind(stmt), NodeKind::Return { .. })
                && i + 1 < stmts.len()
            {
                let span = ast.span(stmts[i + 1]);
                self.add_error(
                    SemanticError::UnreachableStatement { span: span.into() },
                    span,
                );
                reported_unreachable = true;
            }
        }
        self.pop_scope();
    }

    pub(super) fn check_stmt(&mut self, ast: &mut Ast, stmt: NodeId, interner: &Interner) {
        match ast.kind(stmt) {
            NodeKind::Block { .. } => self.check_block(ast, stmt, interner),
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = *cond;
                let then_branch = *then_branch;
                let else_branch = *else_branch;
                let cond_ty = self.check_expr(ast, cond, interner);
                if !matches!(cond_ty, Type::Bool | Type::Error) {
                    self.add_error(
                        SemanticError::IfCondNotBool {
                            found: cond_ty.name().to_string(),
                            span: ast.span(cond).into(),
                        },
                        ast.span(cond),
                    );
                }
                self.check_stmt(ast, then_branch, interner);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(ast, else_branch, interner);
                }
            }
            NodeKind::While { cond, body } => {
                let cond = *cond;
                let body = *body;
                let cond_ty = self.check_expr(ast, cond, interner);
                if !matches!(cond_ty, Type::Bool | Type::Error) {
                    self.add_error(
                        SemanticError::WhileCondNotBool {
                            found: cond_ty.name().to_string(),
                            span: ast.span(cond).into(),
                        },
                        ast.span(cond),
                    );
                }
                self.check_stmt(ast, body, interner);
            }
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => {
                let init = *init;
                let cond = *cond;
                let step = *step;
                let body = *body;
                if let Some(init) = init {
                    self.check_expr(ast, init, interner);
                }
                // an omitted condition loops forever; only a present
                // non-boolean one is flagged
                if let Some(cond) = cond {
                    let cond_ty = self.check_expr(ast, cond, interner);
                    if !matches!(cond_ty, Type::Bool | Type::Error) {
                        self.add_error(
                            SemanticError::ForCondNotBool {
                                found: cond_ty.name().to_string(),
                                span: ast.span(cond).into(),
                            },
                            ast.span(cond),
                        );
                    }
                }
                if let Some(step) = step {
                    self.check_expr(ast, step, interner);
                }
                self.check_stmt(ast, body, interner);
            }
            NodeKind::Break => {
                if !self.inside_loop(ast, stmt) {
                    self.add_error(
                        SemanticError::BreakOutsideLoop {
                            span: ast.span(stmt).into(),
                        },
                        ast.span(stmt),
                    );
                }
            }
            NodeKind::Continue => {
                if !self.inside_loop(ast, stmt) {
                    self.add_error(
                        SemanticError::ContinueOutsideLoop {
                            span: ast.span(stmt).into(),
                        },
                        ast.span(stmt),
                    );
                }
            }
            NodeKind::Return { value } => {
                let value = *value;
                self.check_return(ast, stmt, value, interner);
            }
            NodeKind::ExprStmt { expr } => {
                let expr = *expr;
                self.check_expr(ast, expr, interner);
            }
            _ => {}
        }
    }

    /// Walk the parent chain to the root looking for an enclosing loop.
    /// Parent links are set by the parser before checking starts.
    fn inside_loop(&self, ast: &Ast, stmt: NodeId) -> bool {
        let mut current = ast.parent(stmt);
        while let Some(node) = current {
            if matches!(
                ast.kind(node),
                NodeKind::While { .. } | NodeKind::For { .. }
            ) {
                return true;
            }
            current = ast.parent(node);
        }
        false
    }

    fn check_return(
        &mut self,
        ast: &mut Ast,
        stmt: NodeId,
        value: Option<NodeId>,
        interner: &Interner,
    ) {
        let Some(func) = self.current_function else {
            return;
        };
        let return_type = ast.ty(func).cloned().unwrap_or(Type::Void);
        let span = ast.span(stmt);
        match value {
            Some(value) => {
                let value_ty = self.check_expr(ast, value, interner);
                if let Coercion::Incompatible = self.coerce(ast, value, &value_ty, &return_type) {
                    self.add_error(
                        SemanticError::ReturnIncompatible { span: span.into() },
                        span,
                    );
                }
            }
            None => {
                if return_type != Type::Void {
                    self.add_error(
                        SemanticError::ReturnIncompatible { span: span.into() },
                        span,
                    );
                }
            }
        }
    }

    /// Conservative "every path returns": loops are assumed to run zero
    /// times, so only a return in the sequence itself or on both arms of
    /// an if/else counts.
    pub(super) fn guarantees_return(&self, ast: &Ast, stmt: NodeId) -> bool {
        match ast.kind(stmt) {
            NodeKind::Return { .. } => true,
            NodeKind::Block { stmts, .. } => stmts.iter().any(|&s| self.guarantees_return(ast, s)),
            NodeKind::If {
                then_branch,
                else_branch: Some(else_branch),
                ..
            } => self.guarantees_return(ast, *then_branch) && self.guarantees_return(ast, *else_branch),
            _ => false,
        }
    }
}
