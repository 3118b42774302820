//! Error reporting helpers for the analyzer.

use super::{Analyzer, TypeError};
use crate::errors::SemanticError;
use crate::frontend::Span;

impl Analyzer {
    /// Record a diagnostic. Reporting is additive; the traversal never
    /// stops on an error.
    pub(crate) fn add_error(&mut self, error: SemanticError, span: Span) {
        self.errors.push(TypeError::new(error, span));
    }
}
