//! Serializable view of a [`MemoryCanvas`].

use serde::Serialize;

use super::{
    ConnectorEnd, DocumentKind, DocumentRecord, MemoryCanvas, OpenMode, PageRecord, ShapeKind,
    ShapeRecord,
};
use crate::geometry::{Bounds, Point};

/// Everything a [`MemoryCanvas`] has recorded, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasSnapshot {
    pub documents: Vec<DocumentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentSnapshot {
    Drawing {
        name: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        template: Option<String>,
        open: bool,
        pages: Vec<PageSnapshot>,
    },
    Stencil {
        name: String,
        title: String,
        mode: OpenMode,
        open: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    pub shapes: Vec<ShapeSnapshot>,
    pub connectors: Vec<ConnectorSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `rectangle`, or `<stencil>/<master>` for dropped masters.
    pub source: String,
    pub pin: Point,
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySnapshot {
    pub name: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub dynamic: bool,
    pub begin: Point,
    pub end: Point,
    /// Name of the shape the begin point is glued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Name of the shape the end point is glued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl MemoryCanvas {
    /// Captures the current state of every document.
    ///
    /// Property labels and values are evaluated from their formulas; a
    /// formula that is not a string literal is reported as written.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            documents: self
                .documents()
                .iter()
                .map(|doc| self.document_snapshot(doc))
                .collect(),
        }
    }

    fn document_snapshot(&self, doc: &DocumentRecord) -> DocumentSnapshot {
        match doc.kind() {
            DocumentKind::Drawing { template, pages } => DocumentSnapshot::Drawing {
                name: doc.name().to_string(),
                title: doc.title().to_string(),
                template: template.clone(),
                open: doc.is_open(),
                pages: pages
                    .iter()
                    .filter_map(|page| self.page(*page))
                    .map(|page| self.page_snapshot(page))
                    .collect(),
            },
            DocumentKind::Stencil { mode, .. } => DocumentSnapshot::Stencil {
                name: doc.name().to_string(),
                title: doc.title().to_string(),
                mode: *mode,
                open: doc.is_open(),
            },
        }
    }

    fn page_snapshot(&self, page: &PageRecord) -> PageSnapshot {
        let mut shapes = Vec::new();
        let mut connectors = Vec::new();

        for shape in self.shapes_on(page.handle()) {
            match shape.kind() {
                ShapeKind::Connector(line) => {
                    let glued_name = |end| {
                        line.glued(end)
                            .and_then(|target| self.shape(target))
                            .map(|target| target.name().to_string())
                    };
                    connectors.push(ConnectorSnapshot {
                        name: shape.name().to_string(),
                        text: shape.text().map(str::to_string),
                        dynamic: line.is_dynamic(),
                        begin: line.begin(),
                        end: line.end(),
                        from: glued_name(ConnectorEnd::Begin),
                        to: glued_name(ConnectorEnd::End),
                    });
                }
                ShapeKind::Rectangle | ShapeKind::Master { .. } => {
                    shapes.push(shape_snapshot(shape));
                }
            }
        }

        PageSnapshot {
            name: page.name().to_string(),
            bounds: page.bounds(),
            shapes,
            connectors,
        }
    }
}

fn shape_snapshot(shape: &ShapeRecord) -> ShapeSnapshot {
    let source = match shape.kind() {
        ShapeKind::Master { stencil, master } => format!("{stencil}/{master}"),
        _ => "rectangle".to_string(),
    };
    let properties = shape
        .properties()
        .iter()
        .map(|(name, property)| PropertySnapshot {
            name: name.clone(),
            label: property
                .label()
                .unwrap_or_else(|| property.label_formula().to_string()),
            value: property
                .value()
                .unwrap_or_else(|| property.value_formula().to_string()),
        })
        .collect();

    ShapeSnapshot {
        name: shape.name().to_string(),
        text: shape.text().map(str::to_string),
        source,
        pin: shape.pin(),
        bounds: shape.bounds(),
        properties,
    }
}
