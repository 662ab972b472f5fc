//! An in-process [`Canvas`] that records every construction.
//!
//! [`MemoryCanvas`] behaves like a small diagramming host: it can create
//! drawings from a [`Catalog`] of known templates, open stencils listed in the
//! catalog, drop masters, draw rectangles and lines, store custom property
//! rows and keep glued connector ends attached when shapes move. It backs the
//! test suites and the command-line tool.
//!
//! Failures can be injected per operation with [`MemoryCanvas::inject_fault`]
//! to exercise error isolation in the import engine.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;

use super::{
    Canvas, CanvasError, CanvasOp, CellHandle, ConnectorEnd, DocumentHandle, MasterHandle,
    OpenDocument, OpenMode, PageHandle, Result, ShapeHandle,
};
use crate::{
    formula,
    geometry::{Bounds, Point, Size},
};

/// Number of low bits of a compound handle that hold the row or master index.
const INDEX_BITS: u32 = 32;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Templates and stencils a [`MemoryCanvas`] can load.
///
/// Stencils are keyed by file name (for example `Basic Shapes.vss`) and list
/// the masters they contain. Opening a stencil only succeeds for an exact file
/// name; its title is the file name without extension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    templates: Vec<String>,
    stencils: IndexMap<String, Vec<String>>,
    master_size: Size,
}

impl Catalog {
    /// Creates a catalog with no templates and no stencils.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
            stencils: IndexMap::new(),
            master_size: Size::new(1.0, 1.0),
        }
    }

    /// Adds a document template.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.templates.push(name.into());
        self
    }

    /// Adds a stencil file and its masters.
    pub fn with_stencil<I, S>(mut self, file_name: impl Into<String>, masters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stencils.insert(
            file_name.into(),
            masters.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Sets the size of every dropped master.
    pub fn with_master_size(mut self, size: Size) -> Self {
        self.master_size = size;
        self
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn stencils(&self) -> &IndexMap<String, Vec<String>> {
        &self.stencils
    }

    pub fn master_size(&self) -> Size {
        self.master_size
    }

    fn has_template(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
            .with_template("Basic Diagram.vst")
            .with_stencil(
                "Basic Shapes.vss",
                [
                    "Rectangle",
                    "Square",
                    "Ellipse",
                    "Circle",
                    "Triangle",
                    "Pentagon",
                    "Hexagon",
                    "Octagon",
                    "Rounded rectangle",
                ],
            )
            .with_stencil(
                "Basic Flowchart Shapes.vss",
                ["Process", "Decision", "Start/End", "Document", "Data"],
            )
    }
}

/// What a recorded document holds.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    Drawing {
        template: Option<String>,
        pages: Vec<PageHandle>,
    },
    Stencil {
        masters: Vec<String>,
        mode: OpenMode,
    },
}

/// A document created or opened on a [`MemoryCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    handle: DocumentHandle,
    name: String,
    title: String,
    kind: DocumentKind,
    open: bool,
}

impl DocumentRecord {
    pub fn handle(&self) -> DocumentHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &DocumentKind {
        &self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_stencil(&self) -> bool {
        matches!(self.kind, DocumentKind::Stencil { .. })
    }

    /// Returns the template a drawing was created from.
    pub fn template(&self) -> Option<&str> {
        match &self.kind {
            DocumentKind::Drawing { template, .. } => template.as_deref(),
            DocumentKind::Stencil { .. } => None,
        }
    }

    /// Returns the pages of a drawing; stencils have none.
    pub fn pages(&self) -> &[PageHandle] {
        match &self.kind {
            DocumentKind::Drawing { pages, .. } => pages,
            DocumentKind::Stencil { .. } => &[],
        }
    }
}

/// A page of a recorded drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    handle: PageHandle,
    document: DocumentHandle,
    name: String,
    bounds: Option<Bounds>,
}

impl PageRecord {
    pub fn handle(&self) -> PageHandle {
        self.handle
    }

    pub fn document(&self) -> DocumentHandle {
        self.document
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page extent set by the last resize, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

/// Geometry and glue state of a drawn line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRecord {
    begin: Point,
    end: Point,
    dynamic: bool,
    begin_glue: Option<ShapeHandle>,
    end_glue: Option<ShapeHandle>,
}

impl ConnectorRecord {
    pub fn begin(&self) -> Point {
        self.begin
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns true once the line has been turned into a dynamic connector.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns the shape an end is glued to.
    pub fn glued(&self, end: ConnectorEnd) -> Option<ShapeHandle> {
        match end {
            ConnectorEnd::Begin => self.begin_glue,
            ConnectorEnd::End => self.end_glue,
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.begin, self.end)
    }
}

/// How a recorded shape was created.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle,
    Master { stencil: String, master: String },
    Connector(ConnectorRecord),
}

/// A custom property row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRecord {
    value_formula: String,
    label_formula: String,
}

impl PropertyRecord {
    pub fn value_formula(&self) -> &str {
        &self.value_formula
    }

    pub fn label_formula(&self) -> &str {
        &self.label_formula
    }

    /// Evaluates the value formula when it is a string literal.
    pub fn value(&self) -> Option<String> {
        formula::unquote(&self.value_formula)
    }

    /// Evaluates the label formula when it is a string literal.
    pub fn label(&self) -> Option<String> {
        formula::unquote(&self.label_formula)
    }
}

/// A shape on a page of a [`MemoryCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    handle: ShapeHandle,
    page: PageHandle,
    kind: ShapeKind,
    name: String,
    text: Option<String>,
    bounds: Bounds,
    properties: IndexMap<String, PropertyRecord>,
    deleted: bool,
}

impl ShapeRecord {
    pub fn handle(&self) -> ShapeHandle {
        self.handle
    }

    pub fn page(&self) -> PageHandle {
        self.page
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the pin, which is the center of the shape's bounds.
    pub fn pin(&self) -> Point {
        self.bounds.center()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyRecord> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyRecord> {
        &self.properties
    }

    /// Returns the line state when the shape is a connector.
    pub fn connector(&self) -> Option<&ConnectorRecord> {
        match &self.kind {
            ShapeKind::Connector(connector) => Some(connector),
            _ => None,
        }
    }

    pub fn is_connector(&self) -> bool {
        self.connector().is_some()
    }
}

/// A failure injected for an operation, optionally limited to one argument.
#[derive(Debug, Clone)]
struct Fault {
    op: CanvasOp,
    argument: Option<String>,
}

/// An in-memory diagramming host.
///
/// # Examples
///
/// ```
/// use drafter_core::canvas::{Canvas, MemoryCanvas};
/// use drafter_core::geometry::{Bounds, Point};
///
/// let mut canvas = MemoryCanvas::new();
/// let document = canvas.create_document(None).unwrap();
/// let page = canvas.first_page(document).unwrap();
/// let shape = canvas
///     .draw_rectangle(page, Bounds::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 0.5)))
///     .unwrap();
///
/// assert_eq!(canvas.pin_position(shape).unwrap(), Point::new(0.5, 0.25));
/// ```
#[derive(Debug, Default)]
pub struct MemoryCanvas {
    catalog: Catalog,
    documents: Vec<DocumentRecord>,
    pages: Vec<PageRecord>,
    shapes: Vec<ShapeRecord>,
    faults: Vec<Fault>,
    drawings_created: usize,
}

impl MemoryCanvas {
    /// Creates a canvas backed by the default [`Catalog`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a canvas backed by `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Makes every future call of `op` fail.
    pub fn inject_fault(&mut self, op: CanvasOp) {
        self.faults.push(Fault { op, argument: None });
    }

    /// Makes future calls of `op` fail when their string argument equals `argument`.
    ///
    /// The string argument is the template, title, stencil, master, name, text,
    /// property name or formula the operation receives.
    pub fn inject_fault_for(&mut self, op: CanvasOp, argument: impl Into<String>) {
        self.faults.push(Fault {
            op,
            argument: Some(argument.into()),
        });
    }

    /// Removes every injected fault.
    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    /// Returns every document ever created or opened, including closed ones.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    /// Returns drawing documents only.
    pub fn drawings(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter().filter(|doc| !doc.is_stencil())
    }

    pub fn document(&self, handle: DocumentHandle) -> Option<&DocumentRecord> {
        self.documents.get(index(handle.raw()))
    }

    pub fn page(&self, handle: PageHandle) -> Option<&PageRecord> {
        self.pages.get(index(handle.raw()))
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<&ShapeRecord> {
        self.shapes
            .get(index(handle.raw()))
            .filter(|shape| !shape.deleted)
    }

    /// Returns every shape on every page in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.iter().filter(|shape| !shape.deleted)
    }

    /// Returns every shape on `page` in creation order.
    pub fn shapes_on(&self, page: PageHandle) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes().filter(move |shape| shape.page == page)
    }

    /// Returns the first shape on any page with the given name.
    pub fn shape_named(&self, name: &str) -> Option<&ShapeRecord> {
        self.shapes().find(|shape| shape.name == name)
    }

    /// Moves a shape so its pin lands on `to`, dragging glued connector ends along.
    pub fn move_shape(&mut self, shape: ShapeHandle, to: Point) -> Result<()> {
        let idx = self.shape_index(shape)?;
        let record = &mut self.shapes[idx];
        let offset = to.sub_point(record.pin());
        record.bounds = record.bounds.translate(offset);
        if let ShapeKind::Connector(connector) = &mut record.kind {
            connector.begin = connector.begin.add_point(offset);
            connector.end = connector.end.add_point(offset);
        }
        trace!(shape:% = shape, x = to.x(), y = to.y(); "Moved shape");

        self.follow_glue(shape);
        Ok(())
    }

    fn check(&self, op: CanvasOp, argument: &str) -> Result<()> {
        let hit = self.faults.iter().any(|fault| {
            fault.op == op && fault.argument.as_deref().is_none_or(|arg| arg == argument)
        });
        if hit {
            debug!(op:% = op, argument; "Injected fault triggered");
            return Err(CanvasError::rejected(op, "injected fault"));
        }
        Ok(())
    }

    fn document_index(&self, handle: DocumentHandle) -> Result<usize> {
        let idx = index(handle.raw());
        if idx < self.documents.len() {
            Ok(idx)
        } else {
            Err(CanvasError::unknown(handle))
        }
    }

    fn open_document_index(&self, handle: DocumentHandle) -> Result<usize> {
        let idx = self.document_index(handle)?;
        if self.documents[idx].open {
            Ok(idx)
        } else {
            Err(CanvasError::unknown(handle))
        }
    }

    fn page_index(&self, handle: PageHandle) -> Result<usize> {
        let idx = index(handle.raw());
        if idx < self.pages.len() {
            Ok(idx)
        } else {
            Err(CanvasError::unknown(handle))
        }
    }

    fn shape_index(&self, handle: ShapeHandle) -> Result<usize> {
        let idx = index(handle.raw());
        if self.shapes.get(idx).is_some_and(|shape| !shape.deleted) {
            Ok(idx)
        } else {
            Err(CanvasError::unknown(handle))
        }
    }

    /// Resolves a compound cell handle to its shape and row index.
    fn cell_location(&self, cell: CellHandle) -> Result<(usize, usize)> {
        let shape_idx = index(cell.raw() >> INDEX_BITS);
        let row = index(cell.raw() & INDEX_MASK);
        match self.shapes.get(shape_idx) {
            Some(shape) if !shape.deleted && row < shape.properties.len() => Ok((shape_idx, row)),
            _ => Err(CanvasError::unknown(cell)),
        }
    }

    fn add_shape(&mut self, page: PageHandle, kind: ShapeKind, bounds: Bounds) -> ShapeHandle {
        let handle = ShapeHandle::new(self.shapes.len() as u64);
        let name = match &kind {
            ShapeKind::Master { master, .. } => {
                if self.shapes_on(page).any(|shape| &shape.name == master) {
                    format!("{master}.{}", handle.raw() + 1)
                } else {
                    master.clone()
                }
            }
            ShapeKind::Rectangle | ShapeKind::Connector(_) => format!("Sheet.{}", handle.raw() + 1),
        };

        trace!(shape:% = handle, page:% = page, name = name.as_str(); "Added shape");
        self.shapes.push(ShapeRecord {
            handle,
            page,
            kind,
            name,
            text: None,
            bounds,
            properties: IndexMap::new(),
            deleted: false,
        });
        handle
    }

    /// Moves every connector end glued to `target` onto its pin.
    fn follow_glue(&mut self, target: ShapeHandle) {
        let Some(pin) = self.shape(target).map(ShapeRecord::pin) else {
            return;
        };

        for shape in &mut self.shapes {
            if let ShapeKind::Connector(connector) = &mut shape.kind {
                if connector.begin_glue == Some(target) {
                    connector.begin = pin;
                }
                if connector.end_glue == Some(target) {
                    connector.end = pin;
                }
                shape.bounds = connector.bounds();
            }
        }
    }
}

impl Canvas for MemoryCanvas {
    fn create_document(&mut self, template: Option<&str>) -> Result<DocumentHandle> {
        self.check(CanvasOp::CreateDocument, template.unwrap_or_default())?;
        if let Some(template) = template {
            if !self.catalog.has_template(template) {
                return Err(CanvasError::TemplateNotFound(template.to_string()));
            }
        }

        self.drawings_created += 1;
        let handle = DocumentHandle::new(self.documents.len() as u64);
        let page = PageHandle::new(self.pages.len() as u64);
        let name = format!("Drawing{}", self.drawings_created);

        self.pages.push(PageRecord {
            handle: page,
            document: handle,
            name: "Page-1".to_string(),
            bounds: None,
        });
        self.documents.push(DocumentRecord {
            handle,
            name: name.clone(),
            title: String::new(),
            kind: DocumentKind::Drawing {
                template: template.map(str::to_string),
                pages: vec![page],
            },
            open: true,
        });

        debug!(document = name.as_str(), template:?; "Created drawing");
        Ok(handle)
    }

    fn first_page(&self, document: DocumentHandle) -> Result<PageHandle> {
        self.check(CanvasOp::FirstPage, "")?;
        let idx = self.open_document_index(document)?;
        self.documents[idx]
            .pages()
            .first()
            .copied()
            .ok_or(CanvasError::NoPages(document))
    }

    fn set_document_title(&mut self, document: DocumentHandle, title: &str) -> Result<()> {
        self.check(CanvasOp::SetDocumentTitle, title)?;
        let idx = self.open_document_index(document)?;
        self.documents[idx].title = title.to_string();
        Ok(())
    }

    fn close_document(&mut self, document: DocumentHandle) -> Result<()> {
        self.check(CanvasOp::CloseDocument, "")?;
        let idx = self.open_document_index(document)?;
        self.documents[idx].open = false;
        debug!(document = self.documents[idx].name.as_str(); "Closed document");
        Ok(())
    }

    fn open_documents(&self) -> Vec<OpenDocument> {
        self.documents
            .iter()
            .filter(|doc| doc.open)
            .map(|doc| OpenDocument {
                name: doc.name.clone(),
                title: doc.title.clone(),
                handle: doc.handle,
            })
            .collect()
    }

    fn open_stencil(&mut self, name: &str, mode: OpenMode) -> Result<DocumentHandle> {
        self.check(CanvasOp::OpenStencil, name)?;

        if let Some(open) = self
            .documents
            .iter()
            .find(|doc| doc.open && doc.is_stencil() && doc.name == name)
        {
            return Ok(open.handle);
        }

        let masters = self
            .catalog
            .stencils
            .get(name)
            .cloned()
            .ok_or_else(|| CanvasError::StencilNotFound(name.to_string()))?;
        let title = Path::new(name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());

        let handle = DocumentHandle::new(self.documents.len() as u64);
        self.documents.push(DocumentRecord {
            handle,
            name: name.to_string(),
            title,
            kind: DocumentKind::Stencil { masters, mode },
            open: true,
        });

        debug!(stencil = name, mode:% = mode; "Opened stencil");
        Ok(handle)
    }

    fn master(&self, stencil: DocumentHandle, name: &str) -> Result<MasterHandle> {
        self.check(CanvasOp::Master, name)?;
        let idx = self.open_document_index(stencil)?;
        let doc = &self.documents[idx];
        let DocumentKind::Stencil { masters, .. } = &doc.kind else {
            return Err(CanvasError::MasterNotFound {
                stencil: doc.name.clone(),
                master: name.to_string(),
            });
        };

        masters
            .iter()
            .position(|master| master == name)
            .map(|pos| MasterHandle::new(((idx as u64) << INDEX_BITS) | pos as u64))
            .ok_or_else(|| CanvasError::MasterNotFound {
                stencil: doc.name.clone(),
                master: name.to_string(),
            })
    }

    fn drop_master(
        &mut self,
        page: PageHandle,
        master: MasterHandle,
        at: Point,
    ) -> Result<ShapeHandle> {
        let doc_idx = index(master.raw() >> INDEX_BITS);
        let pos = index(master.raw() & INDEX_MASK);
        let (stencil, master_name) = match self.documents.get(doc_idx) {
            Some(DocumentRecord {
                name,
                kind: DocumentKind::Stencil { masters, .. },
                open: true,
                ..
            }) if pos < masters.len() => (name.clone(), masters[pos].clone()),
            _ => return Err(CanvasError::unknown(master)),
        };
        self.check(CanvasOp::DropMaster, &master_name)?;
        self.page_index(page)?;

        let bounds = Bounds::from_center(at, self.catalog.master_size);
        Ok(self.add_shape(
            page,
            ShapeKind::Master {
                stencil,
                master: master_name,
            },
            bounds,
        ))
    }

    fn draw_rectangle(&mut self, page: PageHandle, bounds: Bounds) -> Result<ShapeHandle> {
        self.check(CanvasOp::DrawRectangle, "")?;
        self.page_index(page)?;
        Ok(self.add_shape(page, ShapeKind::Rectangle, bounds))
    }

    fn draw_line(&mut self, page: PageHandle, from: Point, to: Point) -> Result<ShapeHandle> {
        self.check(CanvasOp::DrawLine, "")?;
        self.page_index(page)?;
        let connector = ConnectorRecord {
            begin: from,
            end: to,
            dynamic: false,
            begin_glue: None,
            end_glue: None,
        };
        let bounds = connector.bounds();
        Ok(self.add_shape(page, ShapeKind::Connector(connector), bounds))
    }

    fn delete_shape(&mut self, shape: ShapeHandle) -> Result<()> {
        self.check(CanvasOp::DeleteShape, "")?;
        let idx = self.shape_index(shape)?;
        self.shapes[idx].deleted = true;
        trace!(shape:% = shape; "Deleted shape");
        Ok(())
    }

    fn set_shape_name(&mut self, shape: ShapeHandle, name: &str) -> Result<()> {
        self.check(CanvasOp::SetShapeName, name)?;
        let idx = self.shape_index(shape)?;
        self.shapes[idx].name = name.to_string();
        Ok(())
    }

    fn set_shape_text(&mut self, shape: ShapeHandle, text: &str) -> Result<()> {
        self.check(CanvasOp::SetShapeText, text)?;
        let idx = self.shape_index(shape)?;
        self.shapes[idx].text = Some(text.to_string());
        Ok(())
    }

    fn pin_position(&self, shape: ShapeHandle) -> Result<Point> {
        self.check(CanvasOp::PinPosition, "")?;
        let idx = self.shape_index(shape)?;
        Ok(self.shapes[idx].pin())
    }

    fn property_cell(&self, shape: ShapeHandle, name: &str) -> Result<Option<CellHandle>> {
        self.check(CanvasOp::PropertyCell, name)?;
        let idx = self.shape_index(shape)?;
        Ok(self.shapes[idx]
            .properties
            .get_index_of(name)
            .map(|row| CellHandle::new(((idx as u64) << INDEX_BITS) | row as u64)))
    }

    fn add_property_row(&mut self, shape: ShapeHandle, name: &str) -> Result<()> {
        self.check(CanvasOp::AddPropertyRow, name)?;
        let idx = self.shape_index(shape)?;
        let properties = &mut self.shapes[idx].properties;
        if properties.contains_key(name) {
            return Err(CanvasError::rejected(
                CanvasOp::AddPropertyRow,
                format!("row `{name}` already exists"),
            ));
        }
        properties.insert(name.to_string(), PropertyRecord::default());
        Ok(())
    }

    fn set_cell_value_formula(&mut self, cell: CellHandle, formula: &str) -> Result<()> {
        self.check(CanvasOp::SetCellValue, formula)?;
        let (shape_idx, row) = self.cell_location(cell)?;
        if let Some((_, property)) = self.shapes[shape_idx].properties.get_index_mut(row) {
            property.value_formula = formula.to_string();
        }
        Ok(())
    }

    fn set_cell_label_formula(&mut self, cell: CellHandle, formula: &str) -> Result<()> {
        self.check(CanvasOp::SetCellLabel, formula)?;
        let (shape_idx, row) = self.cell_location(cell)?;
        if let Some((_, property)) = self.shapes[shape_idx].properties.get_index_mut(row) {
            property.label_formula = formula.to_string();
        }
        Ok(())
    }

    fn set_dynamic(&mut self, connector: ShapeHandle) -> Result<()> {
        self.check(CanvasOp::SetDynamic, "")?;
        let idx = self.shape_index(connector)?;
        match &mut self.shapes[idx].kind {
            ShapeKind::Connector(record) => {
                record.dynamic = true;
                Ok(())
            }
            _ => Err(CanvasError::rejected(
                CanvasOp::SetDynamic,
                format!("{connector} is not a line"),
            )),
        }
    }

    fn glue(
        &mut self,
        connector: ShapeHandle,
        end: ConnectorEnd,
        target: ShapeHandle,
    ) -> Result<()> {
        self.check(CanvasOp::Glue, "")?;
        if connector == target {
            return Err(CanvasError::rejected(
                CanvasOp::Glue,
                "a connector cannot be glued to itself",
            ));
        }
        let idx = self.shape_index(connector)?;
        let target_idx = self.shape_index(target)?;
        if self.shapes[idx].page != self.shapes[target_idx].page {
            return Err(CanvasError::rejected(
                CanvasOp::Glue,
                format!("{target} is on another page"),
            ));
        }

        let pin = self.shapes[target_idx].pin();
        let record = &mut self.shapes[idx];
        let ShapeKind::Connector(line) = &mut record.kind else {
            return Err(CanvasError::rejected(
                CanvasOp::Glue,
                format!("{connector} is not a line"),
            ));
        };
        match end {
            ConnectorEnd::Begin => {
                line.begin = pin;
                line.begin_glue = Some(target);
            }
            ConnectorEnd::End => {
                line.end = pin;
                line.end_glue = Some(target);
            }
        }
        record.bounds = line.bounds();

        trace!(connector:% = connector, end:? = end, target:% = target; "Glued connector");
        Ok(())
    }

    fn resize_page_to_contents(&mut self, page: PageHandle) -> Result<()> {
        self.check(CanvasOp::ResizePage, "")?;
        let idx = self.page_index(page)?;
        let bounds = self
            .shapes_on(page)
            .map(ShapeRecord::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds));
        self.pages[idx].bounds = bounds;
        Ok(())
    }
}

fn index(raw: u64) -> usize {
    usize::try_from(raw).unwrap_or(usize::MAX)
}
