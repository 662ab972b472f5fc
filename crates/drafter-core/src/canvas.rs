//! The canvas collaborator interface.
//!
//! The import engine never talks to a diagramming host directly. Everything it
//! needs from one (documents, pages, masters, shapes, property cells and glue)
//! is expressed by the [`Canvas`] trait and addressed through small opaque
//! handles. A host integration implements the trait over its own object model;
//! [`MemoryCanvas`] implements it in process and records every construction.
//!
//! All operations are synchronous and take the canvas by `&mut` when they
//! mutate it; a canvas is a single shared resource and the engine drives it
//! strictly in order.

mod memory;
mod snapshot;

pub use memory::{
    Catalog, ConnectorRecord, DocumentKind, DocumentRecord, MemoryCanvas, PageRecord,
    PropertyRecord, ShapeKind, ShapeRecord,
};
pub use snapshot::{
    CanvasSnapshot, ConnectorSnapshot, DocumentSnapshot, PageSnapshot, PropertySnapshot,
    ShapeSnapshot,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Bounds, Point};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw host-side index.
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw host-side index.
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

handle!(
    /// A document open in the host: a drawing or a stencil.
    DocumentHandle
);
handle!(
    /// A page of a drawing document.
    PageHandle
);
handle!(
    /// A shape on a page. Connectors are shapes too.
    ShapeHandle
);
handle!(
    /// A master inside a stencil document.
    MasterHandle
);
handle!(
    /// A custom property row of a shape.
    CellHandle
);

/// A type alias for `Result<T, CanvasError>`.
pub type Result<T> = std::result::Result<T, CanvasError>;

/// How a stencil document is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    /// Opened as a docked reference stencil next to the drawing.
    #[default]
    Docked,
    /// Opened read-only without docking.
    ReadOnly,
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::Docked => write!(f, "docked"),
            OpenMode::ReadOnly => write!(f, "read_only"),
        }
    }
}

/// One end of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorEnd {
    Begin,
    End,
}

/// An entry of [`Canvas::open_documents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    /// The document's internal (file) name.
    pub name: String,
    /// The document's display title.
    pub title: String,
    pub handle: DocumentHandle,
}

/// Canvas operations, used to name failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasOp {
    CreateDocument,
    FirstPage,
    SetDocumentTitle,
    CloseDocument,
    OpenStencil,
    Master,
    DropMaster,
    DrawRectangle,
    DrawLine,
    DeleteShape,
    SetShapeName,
    SetShapeText,
    PinPosition,
    PropertyCell,
    AddPropertyRow,
    SetCellValue,
    SetCellLabel,
    SetDynamic,
    Glue,
    ResizePage,
}

impl fmt::Display for CanvasOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanvasOp::CreateDocument => "create document",
            CanvasOp::FirstPage => "get first page",
            CanvasOp::SetDocumentTitle => "set document title",
            CanvasOp::CloseDocument => "close document",
            CanvasOp::OpenStencil => "open stencil",
            CanvasOp::Master => "look up master",
            CanvasOp::DropMaster => "drop master",
            CanvasOp::DrawRectangle => "draw rectangle",
            CanvasOp::DrawLine => "draw line",
            CanvasOp::DeleteShape => "delete shape",
            CanvasOp::SetShapeName => "set shape name",
            CanvasOp::SetShapeText => "set shape text",
            CanvasOp::PinPosition => "read pin position",
            CanvasOp::PropertyCell => "reference property cell",
            CanvasOp::AddPropertyRow => "add property row",
            CanvasOp::SetCellValue => "set cell value",
            CanvasOp::SetCellLabel => "set cell label",
            CanvasOp::SetDynamic => "make connector dynamic",
            CanvasOp::Glue => "glue connector",
            CanvasOp::ResizePage => "resize page",
        };
        f.write_str(name)
    }
}

/// Errors reported by a [`Canvas`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("document template not found: {0}")]
    TemplateNotFound(String),

    #[error("stencil not found: {0}")]
    StencilNotFound(String),

    #[error("master `{master}` not found in stencil `{stencil}`")]
    MasterNotFound { stencil: String, master: String },

    #[error("document has no pages: {0}")]
    NoPages(DocumentHandle),

    #[error("unknown handle: {0}")]
    UnknownHandle(String),

    #[error("{op} failed: {reason}")]
    Rejected { op: CanvasOp, reason: String },
}

impl CanvasError {
    /// Create a new `Rejected` error for `op`.
    pub fn rejected(op: CanvasOp, reason: impl Into<String>) -> Self {
        Self::Rejected {
            op,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(handle: impl fmt::Display) -> Self {
        Self::UnknownHandle(handle.to_string())
    }
}

/// The operation set the import engine requires from a diagramming host.
///
/// Implementations map each call onto the host's object model. Handles are
/// only meaningful to the canvas that issued them.
pub trait Canvas {
    /// Creates a drawing document, blank when `template` is `None`.
    fn create_document(&mut self, template: Option<&str>) -> Result<DocumentHandle>;

    /// Returns the first page of a drawing document.
    fn first_page(&self, document: DocumentHandle) -> Result<PageHandle>;

    /// Sets the display title of a document.
    fn set_document_title(&mut self, document: DocumentHandle, title: &str) -> Result<()>;

    /// Closes a document.
    fn close_document(&mut self, document: DocumentHandle) -> Result<()>;

    /// Lists the documents currently open in the host, in host order.
    fn open_documents(&self) -> Vec<OpenDocument>;

    /// Opens a stencil document by file name.
    fn open_stencil(&mut self, name: &str, mode: OpenMode) -> Result<DocumentHandle>;

    /// Looks up a master by name inside a stencil.
    fn master(&self, stencil: DocumentHandle, name: &str) -> Result<MasterHandle>;

    /// Drops an instance of `master` onto `page`, centered on `at`.
    fn drop_master(
        &mut self,
        page: PageHandle,
        master: MasterHandle,
        at: Point,
    ) -> Result<ShapeHandle>;

    /// Draws a primitive rectangle covering `bounds`.
    fn draw_rectangle(&mut self, page: PageHandle, bounds: Bounds) -> Result<ShapeHandle>;

    /// Draws a straight line from `from` to `to`.
    fn draw_line(&mut self, page: PageHandle, from: Point, to: Point) -> Result<ShapeHandle>;

    /// Removes a shape from its page. Its handle is invalid afterwards.
    fn delete_shape(&mut self, shape: ShapeHandle) -> Result<()>;

    fn set_shape_name(&mut self, shape: ShapeHandle, name: &str) -> Result<()>;

    fn set_shape_text(&mut self, shape: ShapeHandle, text: &str) -> Result<()>;

    /// Returns the shape's pin, the anchor used for positioning and glue.
    fn pin_position(&self, shape: ShapeHandle) -> Result<Point>;

    /// References the custom property row `name`, or `None` if the shape has no such row.
    fn property_cell(&self, shape: ShapeHandle, name: &str) -> Result<Option<CellHandle>>;

    /// Adds a custom property row named `name`.
    fn add_property_row(&mut self, shape: ShapeHandle, name: &str) -> Result<()>;

    /// Sets the value formula of a property row.
    fn set_cell_value_formula(&mut self, cell: CellHandle, formula: &str) -> Result<()>;

    /// Sets the label formula of a property row.
    fn set_cell_label_formula(&mut self, cell: CellHandle, formula: &str) -> Result<()>;

    /// Turns a drawn line into a dynamically routed connector.
    fn set_dynamic(&mut self, connector: ShapeHandle) -> Result<()>;

    /// Glues one end of `connector` to the pin of `target`.
    fn glue(
        &mut self,
        connector: ShapeHandle,
        end: ConnectorEnd,
        target: ShapeHandle,
    ) -> Result<()>;

    /// Resizes the page so it fits all of its shapes.
    fn resize_page_to_contents(&mut self, page: PageHandle) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        assert_eq!(ShapeHandle::new(7).to_string(), "ShapeHandle#7");
        assert_eq!(DocumentHandle::new(0).raw(), 0);
    }

    #[test]
    fn test_rejected_error_display() {
        let err = CanvasError::rejected(CanvasOp::SetShapeText, "locked");
        assert_eq!(err.to_string(), "set shape text failed: locked");

        let err = CanvasError::rejected(CanvasOp::DeleteShape, "injected fault");
        assert_eq!(err.to_string(), "delete shape failed: injected fault");
    }

    #[test]
    fn test_open_mode_deserializes_snake_case() {
        let mode: OpenMode = serde_json::from_str("\"read_only\"").unwrap();
        assert_eq!(mode, OpenMode::ReadOnly);
        assert_eq!(OpenMode::default(), OpenMode::Docked);
    }
}
