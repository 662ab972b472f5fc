use std::fmt;

use crate::{
    error::{ErrorCode, Label},
    span::Span,
};

/// An error message with source location information.
///
/// ```text
/// error[E200]: invalid type: string "left", expected f64
///   --> diagram.json:4:22
///    |
///  4 |     { "id": "a", "x": "left" }
///    |                       ^ wrong type here
///    |
///    = help: `x` and `y` are numbers in page units
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use drafter_parser::error::{Diagnostic, ErrorCode};
    /// # use drafter_parser::Span;
    ///
    /// let diag = Diagnostic::error("EOF while parsing an object")
    ///     .with_code(ErrorCode::E101)
    ///     .with_label(Span::new(12..12), "input ends here");
    ///
    /// assert_eq!(diag.to_string(), "error[E101]: EOF while parsing an object");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a label marking where the problem is.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
