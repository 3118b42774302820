// src/errors/mod.rs
//! Structured error reporting for the Mini-C front end.
//!
//! This module provides error types using miette for diagnostics.

pub mod sema;

pub use sema::SemanticError;
