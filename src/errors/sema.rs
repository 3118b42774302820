// src/errors/sema.rs
//! Semantic analysis errors (E2xxx).
//!
//! One variant per scope/type rule. Codes and message templates are a
//! stable surface; each template substitutes at most one argument.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SemanticError {
    #[error("main function is missing")]
    #[diagnostic(code(E2001))]
    MainMissing {
        #[label("program has no function named 'main'")]
        span: SourceSpan,
    },

    #[error("return type of main is not int")]
    #[diagnostic(code(E2002))]
    MainReturnNotInt {
        #[label("declared here")]
        span: SourceSpan,
    },

    #[error("identifier '{name}' redeclared")]
    #[diagnostic(code(E2003))]
    Redeclared {
        name: String,
        #[label("already declared in this scope")]
        span: SourceSpan,
    },

    #[error("identifier '{name}' declared void")]
    #[diagnostic(code(E2004))]
    DeclaredVoid {
        name: String,
        #[label("void is not a value type")]
        span: SourceSpan,
    },

    #[error("identifier '{name}' declared void[]")]
    #[diagnostic(code(E2005))]
    DeclaredVoidArray {
        name: String,
        #[label("array elements cannot be void")]
        span: SourceSpan,
    },

    #[error("identifier '{name}' undeclared")]
    #[diagnostic(code(E2006))]
    Undeclared {
        name: String,
        #[label("not found in scope")]
        span: SourceSpan,
    },

    #[error("invalid lvalue in assignment")]
    #[diagnostic(code(E2007))]
    InvalidLvalue {
        #[label("not an assignable location")]
        span: SourceSpan,
    },

    #[error("incompatible types for assignment")]
    #[diagnostic(code(E2008))]
    AssignIncompatible {
        #[label("right side cannot convert to the target type")]
        span: SourceSpan,
    },

    #[error("'{name}' is an array or function, used as a scalar")]
    #[diagnostic(code(E2009))]
    ArrayOrFuncAsScalar {
        name: String,
        #[label("plain value required here")]
        span: SourceSpan,
    },

    #[error("'{name}' is not an array, used as an array")]
    #[diagnostic(code(E2010))]
    ScalarAsArray {
        name: String,
        #[label("only arrays can be indexed")]
        span: SourceSpan,
    },

    #[error("wrong type for element in array initialiser")]
    #[diagnostic(code(E2011))]
    InitElementIncompatible {
        #[label("does not convert to the element type")]
        span: SourceSpan,
    },

    #[error("array initialiser given for scalar '{name}'")]
    #[diagnostic(code(E2012))]
    InitForScalar {
        name: String,
        #[label("brace initialiser on a non-array")]
        span: SourceSpan,
    },

    #[error("scalar initialiser given for array '{name}'")]
    #[diagnostic(code(E2013))]
    ScalarInitForArray {
        name: String,
        #[label("array needs a brace initialiser")]
        span: SourceSpan,
    },

    #[error("excess elements in array initialiser")]
    #[diagnostic(code(E2014))]
    ExcessInitElements {
        #[label("more elements than the declared size")]
        span: SourceSpan,
    },

    #[error("array subscript is not an integer")]
    #[diagnostic(code(E2015))]
    SubscriptNotInt {
        #[label("index must be int")]
        span: SourceSpan,
    },

    #[error("array size missing for '{name}'")]
    #[diagnostic(code(E2016))]
    ArraySizeMissing {
        name: String,
        #[label("no size and no initialiser to infer one from")]
        span: SourceSpan,
    },

    #[error("'{name}' is not a function")]
    #[diagnostic(code(E2017))]
    CallNonFunction {
        name: String,
        #[label("called here")]
        span: SourceSpan,
    },

    #[error("if condition is not boolean (found {found})")]
    #[diagnostic(code(E2018))]
    IfCondNotBool {
        found: String,
        #[label("expected boolean")]
        span: SourceSpan,
    },

    #[error("for condition is not boolean (found {found})")]
    #[diagnostic(code(E2019))]
    ForCondNotBool {
        found: String,
        #[label("expected boolean")]
        span: SourceSpan,
    },

    #[error("while condition is not boolean (found {found})")]
    #[diagnostic(code(E2020))]
    WhileCondNotBool {
        found: String,
        #[label("expected boolean")]
        span: SourceSpan,
    },

    #[error("break must be inside a while or for")]
    #[diagnostic(code(E2021))]
    BreakOutsideLoop {
        #[label("no enclosing loop")]
        span: SourceSpan,
    },

    #[error("continue must be inside a while or for")]
    #[diagnostic(code(E2022))]
    ContinueOutsideLoop {
        #[label("no enclosing loop")]
        span: SourceSpan,
    },

    #[error("too many actual parameters")]
    #[diagnostic(code(E2023))]
    TooManyArgs {
        #[label("argument has no matching parameter")]
        span: SourceSpan,
    },

    #[error("too few actual parameters")]
    #[diagnostic(code(E2024))]
    TooFewArgs {
        #[label("call leaves parameters unmatched")]
        span: SourceSpan,
    },

    #[error("wrong type for actual parameter")]
    #[diagnostic(code(E2025))]
    ArgIncompatible {
        #[label("does not convert to the parameter type")]
        span: SourceSpan,
    },

    #[error("incompatible type for return")]
    #[diagnostic(code(E2026))]
    ReturnIncompatible {
        #[label("does not convert to the declared return type")]
        span: SourceSpan,
    },

    #[error("incompatible operand types for binary operator '{op}'")]
    #[diagnostic(code(E2027))]
    BinaryOperandMismatch {
        op: String,
        #[label("operands violate the operator's signature")]
        span: SourceSpan,
    },

    #[error("incompatible operand type for unary operator '{op}'")]
    #[diagnostic(code(E2028))]
    UnaryOperandMismatch {
        op: String,
        #[label("operand violates the operator's signature")]
        span: SourceSpan,
    },

    #[error("statement(s) not reached")]
    #[diagnostic(code(E2029))]
    UnreachableStatement {
        #[label("follows a return in the same sequence")]
        span: SourceSpan,
    },

    #[error("missing return statement in '{name}'")]
    #[diagnostic(code(E2030))]
    MissingReturn {
        name: String,
        #[label("a control path reaches the end without returning")]
        span: SourceSpan,
    },
}
