// src/sema/analyzer/expr.rs

use super::*;

impl Analyzer {
    /// Check an expression, decorate it with its resolved type, and return
    /// the type.
    pub(crate) fn check_expr(&mut self, ast: &mut Ast, expr: NodeId, interner: &Interner) -> Type {
        let ty = self.check_expr_inner(ast, expr, interner);
        ast.set_ty(expr, ty.clone());
        ty
    }

    fn check_expr_inner(&mut self, ast: &mut Ast, expr: NodeId, interner: &Interner) -> Type {
        match ast.kind(expr) {
            NodeKind::IntLit(_) => Type::Int,
            NodeKind::FloatLit(_) => Type::Float,
            NodeKind::BoolLit(_) => Type::Bool,
            NodeKind::StrLit(_) => Type::String,
            NodeKind::IntToFloat(_) => Type::Float,
            NodeKind::Ident(name) => {
                let name = *name;
                self.check_var_ref(ast, expr, name, interner)
            }
            NodeKind::Index { .. } => self.check_index(ast, expr, interner),
            NodeKind::Call { .. } => self.check_call(ast, expr, interner),
            NodeKind::Assign { .. } => self.check_assign(ast, expr, interner),
            NodeKind::Unary { op, operand } => {
                let op = *op;
                let operand = *operand;
                self.check_unary(ast, expr, op, operand, interner)
            }
            NodeKind::Binary { op, left, right } => {
                let op = *op;
                let left = *left;
                let right = *right;
                self.check_binary(ast, expr, op, left, right, interner)
            }
            NodeKind::ArrayInit { elems } => {
                // a brace initializer is only meaningful against an array
                // declaration; the declaration checks handle that pairing,
                // so here the elements are just typed for decoration
                let elems = elems.clone();
                for elem in elems {
                    self.check_expr(ast, elem, interner);
                }
                Type::Error
            }
            // non-expression kinds never reach the expression checker
            _ => Type::Error,
        }
    }

    /// A variable reference in plain-value position. Whole arrays and
    /// function names are not values; an undeclared name reports once and
    /// skips further role checks.
    fn check_var_ref(
        &mut self,
        ast: &mut Ast,
        expr: NodeId,
        name: Symbol,
        interner: &Interner,
    ) -> Type {
        let Some(decl) = self.scope.get(name) else {
            self.add_error(
                SemanticError::Undeclared {
                    name: interner.resolve(name).to_string(),
                    span: ast.span(expr).into(),
                },
                ast.span(expr),
            );
            return Type::Error;
        };
        ast.link_decl(expr, decl);

        if matches!(ast.kind(decl), NodeKind::Function { .. }) {
            self.add_error(
                SemanticError::ArrayOrFuncAsScalar {
                    name: interner.resolve(name).to_string(),
                    span: ast.span(expr).into(),
                },
                ast.span(expr),
            );
            return Type::Error;
        }
        let ty = self.decl_type(ast, decl);
        if ty.is_array() {
            self.add_error(
                SemanticError::ArrayOrFuncAsScalar {
                    name: interner.resolve(name).to_string(),
                    span: ast.span(expr).into(),
                },
                ast.span(expr),
            );
            return Type::Error;
        }
        ty
    }

    /// `base[index]`: the subscript must be int, the base an array
    /// variable. The expression's type is the element type.
    fn check_index(&mut self, ast: &mut Ast, expr: NodeId, interner: &Interner) -> Type {
        let NodeKind::Index { base, index } = ast.kind(expr) else {
            return Type::Error;
        };
        let base = *base;
        let index = *index;

        let index_ty = self.check_expr(ast, index, interner);
        if !matches!(index_ty, Type::Int | Type::Error) {
            self.add_error(
                SemanticError::SubscriptNotInt {
                    span: ast.span(index).into(),
                },
                ast.span(index),
            );
        }

        self.check_array_base(ast, base, interner)
    }

    /// Resolve the base of an index expression, returning the element
    /// type. Indexing a scalar or a function is a role confusion; an
    /// undeclared base reports only that.
    fn check_array_base(&mut self, ast: &mut Ast, base: NodeId, interner: &Interner) -> Type {
        let span = ast.span(base);
        let NodeKind::Ident(name) = *ast.kind(base) else {
            // the parser only builds identifier bases
            self.check_expr(ast, base, interner);
            return Type::Error;
        };
        let Some(decl) = self.scope.get(name) else {
            self.add_error(
                SemanticError::Undeclared {
                    name: interner.resolve(name).to_string(),
                    span: span.into(),
                },
                span,
            );
            ast.set_ty(base, Type::Error);
            return Type::Error;
        };
        ast.link_decl(base, decl);

        if matches!(ast.kind(decl), NodeKind::Function { .. }) {
            self.add_error(
                SemanticError::ScalarAsArray {
                    name: interner.resolve(name).to_string(),
                    span: span.into(),
                },
                span,
            );
            ast.set_ty(base, Type::Error);
            return Type::Error;
        }
        let ty = self.decl_type(ast, decl);
        match ty {
            Type::Array { ref elem, .. } => {
                let elem_ty = (**elem).clone();
                ast.set_ty(base, ty);
                elem_ty
            }
            Type::Error => {
                ast.set_ty(base, Type::Error);
                Type::Error
            }
            _ => {
                self.add_error(
                    SemanticError::ScalarAsArray {
                        name: interner.resolve(name).to_string(),
                        span: span.into(),
                    },
                    span,
                );
                ast.set_ty(base, Type::Error);
                Type::Error
            }
        }
    }

    /// A call resolves its callee through the same scope as variables.
    /// Argument checking is skipped entirely when the callee is undeclared
    /// or not a function; the callee error is the root cause.
    fn check_call(&mut self, ast: &mut Ast, expr: NodeId, interner: &Interner) -> Type {
        let NodeKind::Call { callee, args } = ast.kind(expr) else {
            return Type::Error;
        };
        let callee = *callee;
        let args = args.clone();
        let span = ast.span(expr);

        let Some(decl) = self.scope.get(callee) else {
            self.add_error(
                SemanticError::Undeclared {
                    name: interner.resolve(callee).to_string(),
                    span: span.into(),
                },
                span,
            );
            return Type::Error;
        };
        ast.link_decl(expr, decl);

        let NodeKind::Function { params, .. } = ast.kind(decl) else {
            self.add_error(
                SemanticError::CallNonFunction {
                    name: interner.resolve(callee).to_string(),
                    span: span.into(),
                },
                span,
            );
            return Type::Error;
        };
        let params = params.clone();
        self.check_args(ast, expr, &args, &params, interner);
        self.decl_type(ast, decl)
    }

    /// Match actuals against formals position by position.
    fn check_args(
        &mut self,
        ast: &mut Ast,
        call: NodeId,
        args: &[NodeId],
        params: &[NodeId],
        interner: &Interner,
    ) {
        if args.len() > params.len() {
            let first_excess = args[params.len()];
            self.add_error(
                SemanticError::TooManyArgs {
                    span: ast.span(first_excess).into(),
                },
                ast.span(first_excess),
            );
            // excess actuals are matched against nothing but still typed
            for &arg in &args[params.len()..] {
                self.check_arg(ast, arg, interner);
            }
        } else if args.len() < params.len() {
            self.add_error(
                SemanticError::TooFewArgs {
                    span: ast.span(call).into(),
                },
                ast.span(call),
            );
        }

        for (&arg, &param) in args.iter().zip(params.iter()) {
            let formal_ty = self.decl_type(ast, param);
            let actual_ty = self.check_arg(ast, arg, interner);
            if actual_ty.is_error() || formal_ty.is_error() {
                continue;
            }
            match (&actual_ty, &formal_ty) {
                // array actuals match array formals by element type
                (
                    Type::Array { elem: actual, .. },
                    Type::Array { elem: formal, .. },
                ) => {
                    if !types_equal(actual, formal) {
                        self.add_error(
                            SemanticError::ArgIncompatible {
                                span: ast.span(arg).into(),
                            },
                            ast.span(arg),
                        );
                    }
                }
                (Type::Array { .. }, _) | (_, Type::Array { .. }) => {
                    self.add_error(
                        SemanticError::ArgIncompatible {
                            span: ast.span(arg).into(),
                        },
                        ast.span(arg),
                    );
                }
                _ => {
                    if let Coercion::Incompatible = self.coerce(ast, arg, &actual_ty, &formal_ty) {
                        self.add_error(
                            SemanticError::ArgIncompatible {
                                span: ast.span(arg).into(),
                            },
                            ast.span(arg),
                        );
                    }
                }
            }
        }
    }

    /// An actual argument is the one position where a whole array is a
    /// legal value; everything else goes through the plain expression
    /// checker.
    fn check_arg(&mut self, ast: &mut Ast, arg: NodeId, interner: &Interner) -> Type {
        if let NodeKind::Ident(name) = *ast.kind(arg)
            && let Some(decl) = self.scope.get(name)
            && !matches!(ast.kind(decl), NodeKind::Function { .. })
        {
            let ty = self.decl_type(ast, decl);
            if ty.is_array() {
                ast.link_decl(arg, decl);
                ast.set_ty(arg, ty.clone());
                return ty;
            }
        }
        self.check_expr(ast, arg, interner)
    }

    fn check_assign(&mut self, ast: &mut Ast, expr: NodeId, interner: &Interner) -> Type {
        let NodeKind::Assign { target, value } = ast.kind(expr) else {
            return Type::Error;
        };
        let target = *target;
        let value = *value;

        let target_ty = self.check_lvalue(ast, target, interner);
        let value_ty = self.check_expr(ast, value, interner);
        if target_ty.is_error() || value_ty.is_error() {
            return Type::Error;
        }
        if let Coercion::Incompatible = self.coerce(ast, value, &value_ty, &target_ty) {
            self.add_error(
                SemanticError::AssignIncompatible {
                    span: ast.span(expr).into(),
                },
                ast.span(expr),
            );
            return Type::Error;
        }
        target_ty
    }

    /// A legal assignment target is a bare variable or an indexed variable
    /// naming a non-function, non-whole-array slot.
    fn check_lvalue(&mut self, ast: &mut Ast, target: NodeId, interner: &Interner) -> Type {
        let span = ast.span(target);
        match *ast.kind(target) {
            NodeKind::Ident(name) => {
                let Some(decl) = self.scope.get(name) else {
                    self.add_error(
                        SemanticError::Undeclared {
                            name: interner.resolve(name).to_string(),
                            span: span.into(),
                        },
                        span,
                    );
                    ast.set_ty(target, Type::Error);
                    return Type::Error;
                };
                ast.link_decl(target, decl);
                let ty = self.decl_type(ast, decl);
                if matches!(ast.kind(decl), NodeKind::Function { .. }) || ty.is_array() {
                    self.add_error(SemanticError::InvalidLvalue { span: span.into() }, span);
                    ast.set_ty(target, Type::Error);
                    return Type::Error;
                }
                ast.set_ty(target, ty.clone());
                ty
            }
            NodeKind::Index { .. } => self.check_expr(ast, target, interner),
            _ => {
                // literals, calls and operator results are not locations
                self.check_expr(ast, target, interner);
                self.add_error(SemanticError::InvalidLvalue { span: span.into() }, span);
                ast.set_ty(target, Type::Error);
                Type::Error
            }
        }
    }

    /// Unary plus and minus preserve a numeric operand's type; logical
    /// negation maps boolean to boolean.
    fn check_unary(
        &mut self,
        ast: &mut Ast,
        expr: NodeId,
        op: UnaryOp,
        operand: NodeId,
        interner: &Interner,
    ) -> Type {
        let operand_ty = self.check_expr(ast, operand, interner);
        if operand_ty.is_error() {
            return Type::Error;
        }
        let ok = match op {
            UnaryOp::Plus | UnaryOp::Neg => operand_ty.is_numeric(),
            UnaryOp::Not => operand_ty == Type::Bool,
        };
        if ok {
            operand_ty
        } else {
            self.add_error(
                SemanticError::UnaryOperandMismatch {
                    op: op.name().to_string(),
                    span: ast.span(expr).into(),
                },
                ast.span(expr),
            );
            Type::Error
        }
    }

    fn check_binary(
        &mut self,
        ast: &mut Ast,
        expr: NodeId,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        interner: &Interner,
    ) -> Type {
        let left_ty = self.check_expr(ast, left, interner);
        let right_ty = self.check_expr(ast, right, interner);
        // an ill-typed operand already reported; absorb
        if left_ty.is_error() || right_ty.is_error() {
            return Type::Error;
        }

        use BinaryOp::*;
        match op {
            Add | Sub | Mul | Div => {
                if left_ty.is_numeric() && right_ty.is_numeric() {
                    self.widen_mixed(ast, left, &left_ty, right, &right_ty);
                    if left_ty == Type::Float || right_ty == Type::Float {
                        Type::Float
                    } else {
                        Type::Int
                    }
                } else {
                    self.binary_mismatch(ast, expr, op)
                }
            }
            Lt | Le | Gt | Ge => {
                if left_ty.is_numeric() && right_ty.is_numeric() {
                    self.widen_mixed(ast, left, &left_ty, right, &right_ty);
                    Type::Bool
                } else {
                    self.binary_mismatch(ast, expr, op)
                }
            }
            Eq | Ne => {
                if left_ty.is_numeric() && right_ty.is_numeric() {
                    self.widen_mixed(ast, left, &left_ty, right, &right_ty);
                    Type::Bool
                } else if left_ty == Type::Bool && right_ty == Type::Bool {
                    Type::Bool
                } else {
                    self.binary_mismatch(ast, expr, op)
                }
            }
            And | Or => {
                if left_ty == Type::Bool && right_ty == Type::Bool {
                    Type::Bool
                } else {
                    self.binary_mismatch(ast, expr, op)
                }
            }
        }
    }

    /// Splice a widen node around the int operand of a mixed int/float
    /// pair, making the implicit conversion explicit.
    fn widen_mixed(
        &mut self,
        ast: &mut Ast,
        left: NodeId,
        left_ty: &Type,
        right: NodeId,
        right_ty: &Type,
    ) {
        match (left_ty, right_ty) {
            (Type::Int, Type::Float) => {
                self.widen(ast, left);
            }
            (Type::Float, Type::Int) => {
                self.widen(ast, right);
            }
            _ => {}
        }
    }

    fn binary_mismatch(&mut self, ast: &Ast, expr: NodeId, op: BinaryOp) -> Type {
        self.add_error(
            SemanticError::BinaryOperandMismatch {
                op: op.name().to_string(),
                span: ast.span(expr).into(),
            },
            ast.span(expr),
        );
        Type::Error
    }
}
