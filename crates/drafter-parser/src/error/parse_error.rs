use std::fmt;

use crate::error::Diagnostic;

/// Error type for reading a diagram description.
///
/// `serde_json` stops at the first problem, so a parse error always holds
/// exactly one [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
