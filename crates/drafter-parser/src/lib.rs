//! # Drafter Parser
//!
//! Reads the JSON diagram description into a [`drafter_core::document::Document`].
//!
//! Unknown fields are ignored and optional fields take their defaults, so the
//! only failures are malformed JSON and values of the wrong type. Each failure
//! is reported as a [`ParseError`] holding a [`error::Diagnostic`] whose
//! label points at the byte offset where reading stopped.
//!
//! ## Usage
//!
//! ```
//! # use drafter_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "name": "Network",
//!         "shapes": [
//!             { "id": "a", "text": "Router", "x": 1, "y": 1 },
//!             { "id": "b", "text": "Switch", "x": 3, "y": 1 }
//!         ],
//!         "connectors": [{ "fromShape": "a", "toShape": "b" }]
//!     }"#;
//!
//!     let document = parse(source)?;
//!     assert_eq!(document.shapes().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod span;

pub use error::ParseError;
pub use span::Span;

use drafter_core::document::Document;
use log::{debug, trace};
use serde_json::error::Category;

use error::{Diagnostic, ErrorCode};

/// Parse a JSON diagram description.
///
/// # Errors
///
/// Returns a [`ParseError`] when `source` is not
/// valid JSON (`E100`), ends early (`E101`), or holds a value of the wrong
/// type for a document field (`E200`).
pub fn parse(source: &str) -> Result<Document, ParseError> {
    trace!(len = source.len(); "Parsing diagram description");

    match serde_json::from_str::<Document>(source) {
        Ok(document) => {
            debug!(
                shapes = document.shapes().len(),
                connectors = document.connectors().len();
                "Parsed diagram description",
            );
            Ok(document)
        }
        Err(err) => {
            let diagnostic = diagnostic_from_json(source, &err);
            debug!(
                code:? = diagnostic.code(),
                line = err.line(),
                column = err.column();
                "Rejected diagram description",
            );
            Err(diagnostic.into())
        }
    }
}

/// Convert a `serde_json` error into a labelled diagnostic.
fn diagnostic_from_json(source: &str, err: &serde_json::Error) -> Diagnostic {
    let message = error_message(err);
    let span = Span::at_line_column(source, err.line(), err.column());

    match err.classify() {
        // Reading from a string never reports `Io`.
        Category::Syntax | Category::Io => Diagnostic::error(message)
            .with_code(ErrorCode::E100)
            .with_label(span, "unexpected character")
            .with_help("check for a missing comma, quote or bracket near this position"),
        Category::Eof => Diagnostic::error(message)
            .with_code(ErrorCode::E101)
            .with_label(Span::new(source.len()..source.len()), "input ends here")
            .with_help("close every open `{` and `[`"),
        Category::Data => Diagnostic::error(message)
            .with_code(ErrorCode::E200)
            .with_label(span, "unexpected value")
            .with_help(
                "`x`, `y`, `width` and `height` are numbers, `shapes` and `connectors` \
                 are arrays, and every other field is a string",
            ),
    }
}

/// Strip the position suffix `serde_json` appends to its messages.
fn error_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    full.strip_suffix(&suffix)
        .map(str::to_string)
        .unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> Diagnostic {
        parse(source).unwrap_err().diagnostic().clone()
    }

    #[test]
    fn test_message_has_no_position_suffix() {
        let diag = single("{\"shapes\": [1,]}");

        assert!(!diag.message().contains(" at line "));
    }

    #[test]
    fn test_syntax_error_code() {
        let diag = single("{\"name\" \"x\"}");

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.labels()[0].message(), "unexpected character");
    }

    #[test]
    fn test_empty_input_is_eof() {
        let diag = single("");

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels()[0].span(), Span::new(0..0));
    }

    #[test]
    fn test_wrong_type_is_data_error() {
        let diag = single("{\"shapes\": [{\"x\": \"left\"}]}");

        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert!(diag.message().contains("invalid type"));
    }
}
