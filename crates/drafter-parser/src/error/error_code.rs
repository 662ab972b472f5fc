//! Error codes for diagram description diagnostics.
//!
//! - `E1xx` - JSON syntax errors
//! - `E2xx` - Document structure errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid JSON syntax.
    ///
    /// A character was found that cannot appear at this position of a JSON
    /// value, such as a missing comma or an unquoted key.
    E100,

    /// Unexpected end of input.
    ///
    /// The input ended before the JSON value was complete.
    E101,

    /// Unexpected value type.
    ///
    /// The JSON is well formed but a field holds a value of the wrong type,
    /// for example a string where a coordinate number is expected, or the
    /// top-level value is not an object.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid JSON syntax",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E200 => "unexpected value type",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
