//! Drafter - builds diagrams on a drawing canvas from JSON descriptions.
//!
//! A description lists shapes with positions, text and custom properties, and
//! connectors that link shapes by id. [`DiagramImporter`] parses it and drives
//! a [`drafter_core::canvas::Canvas`] to create each item, isolating failures
//! so one bad item never aborts the rest of the import.

pub mod build;
pub mod config;
pub mod source;

mod error;

pub use drafter_core::{canvas, document, formula, geometry};

pub use build::{ImportReport, ItemFailure};
pub use error::{ConnectorError, DrafterError, PropertyError, ShapeError};

use std::fs;

use log::{debug, info, trace};

use canvas::Canvas;
use config::AppConfig;
use document::Document;
use source::{IMPORT_FILTERS, JSON_FILTER, SourceSelector};

/// Entry point for importing diagram descriptions.
///
/// # Examples
///
/// ```
/// use drafter::{DiagramImporter, canvas::MemoryCanvas};
///
/// let json = r#"{
///     "name": "Pipeline",
///     "shapes": [
///         { "id": "src", "text": "Source", "x": 1, "y": 1 },
///         { "id": "dst", "text": "Sink", "x": 4, "y": 1 }
///     ],
///     "connectors": [{ "fromShape": "src", "toShape": "dst" }]
/// }"#;
///
/// let mut canvas = MemoryCanvas::new();
/// let report = DiagramImporter::default()
///     .import_json(&mut canvas, json)
///     .expect("Failed to import");
///
/// assert_eq!(report.shapes_created(), 2);
/// assert_eq!(report.connectors_created(), 1);
/// assert!(report.is_clean());
/// ```
#[derive(Debug, Default)]
pub struct DiagramImporter {
    config: AppConfig,
}

impl DiagramImporter {
    /// Create a new importer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON description into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Parse`] with the source attached when the JSON
    /// is malformed or a field has the wrong type.
    pub fn parse(&self, json: &str) -> Result<Document, DrafterError> {
        info!("Parsing diagram description");

        let document = drafter_parser::parse(json)
            .map_err(|err| DrafterError::new_parse_error(err, json))?;

        debug!("Diagram description parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Build a parsed [`Document`] on `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Canvas`] when no document or page can be
    /// obtained from the canvas.
    pub fn build<C>(&self, canvas: &mut C, document: &Document) -> Result<ImportReport, DrafterError>
    where
        C: Canvas + ?Sized,
    {
        build::DocumentBuilder::new(self.config.import()).build(canvas, document)
    }

    /// Parse `json` and build it on `canvas`.
    ///
    /// Nothing is created on the canvas when parsing fails.
    pub fn import_json<C>(&self, canvas: &mut C, json: &str) -> Result<ImportReport, DrafterError>
    where
        C: Canvas + ?Sized,
    {
        let document = self.parse(json)?;
        self.build(canvas, &document)
    }

    /// Ask `selector` for a file, then read and import it.
    ///
    /// Returns `Ok(None)` when the selection is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Io`] when the file cannot be read, and the
    /// errors of [`DiagramImporter::import_json`] otherwise.
    pub fn import_file<C, S>(
        &self,
        canvas: &mut C,
        selector: &mut S,
    ) -> Result<Option<ImportReport>, DrafterError>
    where
        C: Canvas + ?Sized,
        S: SourceSelector + ?Sized,
    {
        let Some(path) = selector.select(IMPORT_FILTERS) else {
            info!("Import cancelled");
            return Ok(None);
        };
        if !JSON_FILTER.matches(&path) {
            debug!(path:? = path; "Selected file does not have a JSON extension");
        }

        info!(path:? = path; "Reading diagram description");
        let json = fs::read_to_string(&path)?;
        self.import_json(canvas, &json).map(Some)
    }
}
