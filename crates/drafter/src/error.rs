//! Error types for diagram imports.
//!
//! [`DrafterError`] is returned when an import cannot proceed at all. Failures
//! of individual shapes, connectors and properties never abort an import;
//! they are reported through [`ShapeError`], [`ConnectorError`] and
//! [`PropertyError`] and collected in the [`crate::ImportReport`].

use std::io;

use thiserror::Error;

use drafter_core::canvas::CanvasError;
use drafter_parser::ParseError;

/// The main error type for Drafter operations.
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render labelled snippets.
#[derive(Debug, Error)]
pub enum DrafterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DrafterError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// A custom property that could not be written.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("property `{name}`: {source}")]
pub struct PropertyError {
    name: String,
    source: CanvasError,
}

impl PropertyError {
    pub(crate) fn new(name: impl Into<String>, source: CanvasError) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Returns the property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canvas_error(&self) -> &CanvasError {
        &self.source
    }
}

/// A shape that could not be created.
///
/// The shape is identified by its name, else its id, else its position in
/// the document (`#3`).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("shape `{shape}`: {source}")]
pub struct ShapeError {
    shape: String,
    source: CanvasError,
}

impl ShapeError {
    pub(crate) fn new(shape: impl Into<String>, source: CanvasError) -> Self {
        Self {
            shape: shape.into(),
            source,
        }
    }

    /// Returns the label identifying the shape.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn canvas_error(&self) -> &CanvasError {
        &self.source
    }
}

/// A connector that could not be created.
///
/// The connector is identified as `from -> to`; a missing endpoint is shown
/// as `?`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectorError {
    #[error("connector `{connector}`: missing `{field}`")]
    MissingEndpoint {
        connector: String,
        field: &'static str,
    },

    #[error("connector `{connector}`: {source}")]
    Canvas {
        connector: String,
        source: CanvasError,
    },
}

impl ConnectorError {
    /// Returns the label identifying the connector.
    pub fn connector(&self) -> &str {
        match self {
            Self::MissingEndpoint { connector, .. } | Self::Canvas { connector, .. } => connector,
        }
    }
}
