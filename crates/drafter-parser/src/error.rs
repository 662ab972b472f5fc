//! Diagnostics for rejected diagram descriptions.
//!
//! A [`Diagnostic`] carries an [`ErrorCode`], a [`Label`] on the offending
//! source span and help text. [`ParseError`] wraps the diagnostic produced
//! for one input so the caller can render it against the source text.
//!
//! # Example
//!
//! ```
//! # use drafter_parser::error::{Diagnostic, ErrorCode};
//! # use drafter_parser::Span;
//!
//! let diag = Diagnostic::error("expected `,` or `}`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(42..43), "unexpected character")
//!     .with_help("separate object members with commas");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
