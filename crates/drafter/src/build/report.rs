use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use drafter_core::canvas::{CanvasError, DocumentHandle, PageHandle, ShapeHandle};

use crate::error::{ConnectorError, PropertyError, ShapeError};

/// A part of an import that failed without aborting it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemFailure {
    #[error("document title: {0}")]
    Title(CanvasError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("shape `{shape}`, {error}")]
    Property { shape: String, error: PropertyError },

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error("page resize: {0}")]
    ResizePage(CanvasError),

    #[error("releasing stencil `{stencil}`: {error}")]
    ReleaseStencil { stencil: String, error: CanvasError },
}

/// What an import built and what went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    document: DocumentHandle,
    page: PageHandle,
    shapes_created: usize,
    shapes_from_master: usize,
    connectors_created: usize,
    connectors_skipped: usize,
    stencils_released: Vec<String>,
    failures: Vec<ItemFailure>,
    identities: IndexMap<String, ShapeHandle>,
}

impl ImportReport {
    pub(crate) fn new(document: DocumentHandle, page: PageHandle) -> Self {
        Self {
            document,
            page,
            shapes_created: 0,
            shapes_from_master: 0,
            connectors_created: 0,
            connectors_skipped: 0,
            stencils_released: Vec::new(),
            failures: Vec::new(),
            identities: IndexMap::new(),
        }
    }

    /// Returns the canvas document the import built.
    pub fn document(&self) -> DocumentHandle {
        self.document
    }

    /// Returns the page every item was placed on.
    pub fn page(&self) -> PageHandle {
        self.page
    }

    pub fn shapes_created(&self) -> usize {
        self.shapes_created
    }

    /// Returns how many of the created shapes were dropped from a master.
    pub fn shapes_from_master(&self) -> usize {
        self.shapes_from_master
    }

    pub fn connectors_created(&self) -> usize {
        self.connectors_created
    }

    /// Returns how many connectors referred to an unknown shape id.
    pub fn connectors_skipped(&self) -> usize {
        self.connectors_skipped
    }

    /// Returns the stencils opened by the import and closed afterwards.
    pub fn stencils_released(&self) -> &[String] {
        &self.stencils_released
    }

    pub fn failures(&self) -> &[ItemFailure] {
        &self.failures
    }

    /// Returns true if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the final id registrations.
    pub fn identities(&self) -> &IndexMap<String, ShapeHandle> {
        &self.identities
    }

    pub(crate) fn record_shape(&mut self, from_master: bool) {
        self.shapes_created += 1;
        if from_master {
            self.shapes_from_master += 1;
        }
    }

    pub(crate) fn record_connector(&mut self) {
        self.connectors_created += 1;
    }

    pub(crate) fn record_skipped_connector(&mut self) {
        self.connectors_skipped += 1;
    }

    pub(crate) fn record_released(&mut self, stencil: String) {
        self.stencils_released.push(stencil);
    }

    pub(crate) fn record_failure(&mut self, failure: impl Into<ItemFailure>) {
        self.failures.push(failure.into());
    }

    pub(crate) fn set_identities(&mut self, identities: IndexMap<String, ShapeHandle>) {
        self.identities = identities;
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shapes ({} from masters), {} connectors, {} skipped, {} failures",
            self.shapes_created,
            self.shapes_from_master,
            self.connectors_created,
            self.connectors_skipped,
            self.failures.len()
        )
    }
}
