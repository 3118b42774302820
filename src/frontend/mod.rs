// src/frontend/mod.rs
pub mod ast;
pub mod intern;
pub mod span;

pub use ast::{Ast, BinaryOp, Node, NodeId, NodeKind, Symbol, TypeExpr, UnaryOp};
pub use intern::Interner;
pub use span::Span;
