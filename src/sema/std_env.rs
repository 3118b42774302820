// src/sema/std_env.rs
//! Standard-environment seeding.
//!
//! The language's I/O primitives are ordinary functions as far as the
//! checker is concerned. Before user code is traversed they are built as
//! real declaration nodes (empty bodies, dummy spans) so that call
//! resolution, argument matching and decoration treat built-ins and user
//! functions identically.

use crate::frontend::{Ast, Interner, NodeId, NodeKind, Span, Symbol, TypeExpr};
use crate::sema::types::Type;

struct StdFunc {
    name: &'static str,
    return_ty: TypeExpr,
    params: &'static [TypeExpr],
}

const STD_FUNCS: [StdFunc; 11] = [
    StdFunc {
        name: "getInt",
        return_ty: TypeExpr::Int,
        params: &[],
    },
    StdFunc {
        name: "putInt",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Int],
    },
    StdFunc {
        name: "putIntLn",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Int],
    },
    StdFunc {
        name: "getFloat",
        return_ty: TypeExpr::Float,
        params: &[],
    },
    StdFunc {
        name: "putFloat",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Float],
    },
    StdFunc {
        name: "putFloatLn",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Float],
    },
    StdFunc {
        name: "putBool",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Bool],
    },
    StdFunc {
        name: "putBoolLn",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::Bool],
    },
    StdFunc {
        name: "putString",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::String],
    },
    StdFunc {
        name: "putStringLn",
        return_ty: TypeExpr::Void,
        params: &[TypeExpr::String],
    },
    StdFunc {
        name: "putLn",
        return_ty: TypeExpr::Void,
        params: &[],
    },
];

/// Build declaration nodes for every built-in function and return the
/// bindings the caller enters into the global scope.
pub(crate) fn seed(ast: &mut Ast, interner: &mut Interner) -> Vec<(Symbol, NodeId)> {
    let span = Span::default();
    let formal = interner.intern("x");
    STD_FUNCS
        .iter()
        .map(|std_func| {
            let name = interner.intern(std_func.name);
            let params: Vec<NodeId> = std_func
                .params
                .iter()
                .map(|ty| {
                    let param = ast.alloc(
                        NodeKind::Param {
                            name: formal,
                            ty: ty.clone(),
                        },
                        span,
                    );
                    ast.set_ty(param, Type::from_type_expr(ty));
                    param
                })
                .collect();
            let body = ast.alloc(
                NodeKind::Block {
                    decls: Vec::new(),
                    stmts: Vec::new(),
                },
                span,
            );
            let func = ast.alloc(
                NodeKind::Function {
                    name,
                    params,
                    return_ty: std_func.return_ty.clone(),
                    body,
                },
                span,
            );
            ast.set_ty(func, Type::from_type_expr(&std_func.return_ty));
            (name, func)
        })
        .collect()
}
