//! Declarative diagram model.
//!
//! A [`Document`] is the typed form of the JSON import format: an ordered list
//! of [`Shape`]s followed by an ordered list of [`Connector`]s that refer to
//! shapes by their logical `id`. All types implement [`serde::Deserialize`];
//! unknown fields are ignored and missing fields take the documented defaults.
//!
//! Empty strings are treated the same as missing values by every accessor
//! that returns `Option<&str>`.
//!
//! # Example
//!
//! ```
//! # use drafter_core::document::{Connector, Document, Shape};
//! let document = Document::new()
//!     .with_shape(Shape::new(0.0, 0.0).with_id("a"))
//!     .with_shape(Shape::new(2.0, 0.0).with_id("b"))
//!     .with_connector(Connector::new("a", "b").with_text("flows to"));
//!
//! assert_eq!(document.shapes().len(), 2);
//! assert_eq!(document.connectors()[0].from_shape(), Some("a"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::geometry::{Point, Size};

/// Stencil used when a shape does not name one.
pub const DEFAULT_STENCIL: &str = "Basic Shapes";

/// Master used when a shape does not name one.
pub const DEFAULT_MASTER: &str = "Rectangle";

/// Width of the fallback rectangle when a shape does not give one.
pub const DEFAULT_WIDTH: f64 = 1.0;

/// Height of the fallback rectangle when a shape does not give one.
pub const DEFAULT_HEIGHT: f64 = 0.5;

/// Connector type recorded when a connector does not give one.
pub const DEFAULT_CONNECTOR_TYPE: &str = "Dynamic connector";

/// A complete diagram description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    template: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    shapes: Vec<Shape>,

    #[serde(default, deserialize_with = "null_as_default")]
    connectors: Vec<Connector>,
}

impl Document {
    /// Creates an empty document with no title and no template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the template the canvas document is created from.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Appends a shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Appends a connector.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Returns the document title, if one is set.
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Returns the template name, or `None` for a blank document.
    pub fn template(&self) -> Option<&str> {
        non_empty(&self.template)
    }

    /// Returns the shapes in declaration order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns the connectors in declaration order.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }
}

/// A single shape to place on the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shape {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    text: Option<String>,

    #[serde(default)]
    x: f64,

    #[serde(default)]
    y: f64,

    #[serde(default = "default_width")]
    width: f64,

    #[serde(default = "default_height")]
    height: f64,

    #[serde(default = "default_stencil")]
    stencil: Option<String>,

    #[serde(default = "default_master")]
    master: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    properties: IndexMap<String, Value>,
}

impl Shape {
    /// Creates a shape at `(x, y)` with every other field at its default.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            id: None,
            name: None,
            text: None,
            x,
            y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stencil: default_stencil(),
            master: default_master(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the size used by the rectangle fallback.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the stencil and master the shape is dropped from.
    pub fn with_master(mut self, stencil: impl Into<String>, master: impl Into<String>) -> Self {
        self.stencil = Some(stencil.into());
        self.master = Some(master.into());
        self
    }

    /// Clears the stencil and master so the shape is always drawn as a rectangle.
    pub fn without_master(mut self) -> Self {
        self.stencil = None;
        self.master = None;
        self
    }

    /// Adds or replaces a custom property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns the logical identifier connectors refer to.
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Returns the name assigned to the canvas shape.
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Returns the display text.
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    /// Returns the drop position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the size of the rectangle fallback.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn stencil(&self) -> Option<&str> {
        non_empty(&self.stencil)
    }

    pub fn master(&self) -> Option<&str> {
        non_empty(&self.master)
    }

    /// Returns `(stencil, master)` when both are set.
    pub fn master_ref(&self) -> Option<(&str, &str)> {
        self.stencil().zip(self.master())
    }

    /// Returns the custom properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A connector linking two shapes by logical identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    from_shape: Option<String>,

    #[serde(default)]
    to_shape: Option<String>,

    #[serde(default)]
    text: Option<String>,

    #[serde(default)]
    connector_type: Option<String>,
}

impl Connector {
    /// Creates a connector from the shape with id `from` to the shape with id `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            from_shape: Some(from.into()),
            to_shape: Some(to.into()),
            text: None,
            connector_type: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_connector_type(mut self, connector_type: impl Into<String>) -> Self {
        self.connector_type = Some(connector_type.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Returns the logical id of the source shape.
    ///
    /// `None` means the field was missing, which the connector builder
    /// treats as a malformed connector rather than a dangling reference.
    pub fn from_shape(&self) -> Option<&str> {
        self.from_shape.as_deref()
    }

    /// Returns the logical id of the target shape.
    pub fn to_shape(&self) -> Option<&str> {
        self.to_shape.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    /// Returns the declared connector type.
    ///
    /// The value is descriptive only; every connector is created dynamic.
    pub fn connector_type(&self) -> &str {
        non_empty(&self.connector_type).unwrap_or(DEFAULT_CONNECTOR_TYPE)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_stencil() -> Option<String> {
    Some(DEFAULT_STENCIL.to_string())
}

fn default_master() -> Option<String> {
    Some(DEFAULT_MASTER.to_string())
}

/// Deserializes an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;

    fn from_json(value: Value) -> Document {
        serde_json::from_value(value).expect("valid document")
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let doc = from_json(json!({}));

        assert_eq!(doc.name(), None);
        assert_eq!(doc.template(), None);
        assert!(doc.shapes().is_empty());
        assert!(doc.connectors().is_empty());
    }

    #[test]
    fn test_shape_defaults() {
        let doc = from_json(json!({ "shapes": [{ "x": 1.5, "y": 2 }] }));
        let shape = &doc.shapes()[0];

        assert_eq!(shape.position(), Point::new(1.5, 2.0));
        assert_approx_eq!(f64, shape.size().width(), DEFAULT_WIDTH);
        assert_approx_eq!(f64, shape.size().height(), DEFAULT_HEIGHT);
        assert_eq!(shape.master_ref(), Some((DEFAULT_STENCIL, DEFAULT_MASTER)));
        assert!(shape.properties().is_empty());
    }

    #[test]
    fn test_missing_position_defaults_to_origin() {
        let doc = from_json(json!({ "shapes": [{ "id": "a" }] }));

        assert_eq!(doc.shapes()[0].position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_null_stencil_disables_master() {
        let doc = from_json(json!({ "shapes": [{ "stencil": null }] }));

        assert_eq!(doc.shapes()[0].stencil(), None);
        assert_eq!(doc.shapes()[0].master_ref(), None);
    }

    #[test]
    fn test_empty_strings_read_as_absent() {
        let doc = from_json(json!({
            "name": "",
            "template": "",
            "shapes": [{ "id": "", "name": "", "text": "", "master": "" }]
        }));
        let shape = &doc.shapes()[0];

        assert_eq!(doc.name(), None);
        assert_eq!(doc.template(), None);
        assert_eq!(shape.id(), None);
        assert_eq!(shape.name(), None);
        assert_eq!(shape.text(), None);
        assert_eq!(shape.master_ref(), None);
    }

    #[test]
    fn test_null_collections_are_empty() {
        let doc = from_json(json!({
            "shapes": null,
            "connectors": null
        }));

        assert!(doc.shapes().is_empty());
        assert!(doc.connectors().is_empty());

        let doc = from_json(json!({ "shapes": [{ "properties": null }] }));
        assert!(doc.shapes()[0].properties().is_empty());
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let doc = from_json(json!({
            "shapes": [{ "properties": { "Zeta": 1, "Alpha": true, "Mid": "x" } }]
        }));
        let keys: Vec<_> = doc.shapes()[0].properties().keys().cloned().collect();

        assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_connector_camel_case_fields() {
        let doc = from_json(json!({
            "connectors": [{
                "id": "c1",
                "fromShape": "a",
                "toShape": "b",
                "text": "flows to",
                "connectorType": "Curved"
            }]
        }));
        let connector = &doc.connectors()[0];

        assert_eq!(connector.id(), Some("c1"));
        assert_eq!(connector.from_shape(), Some("a"));
        assert_eq!(connector.to_shape(), Some("b"));
        assert_eq!(connector.text(), Some("flows to"));
        assert_eq!(connector.connector_type(), "Curved");
    }

    #[test]
    fn test_connector_type_default() {
        let doc = from_json(json!({ "connectors": [{ "fromShape": "a", "toShape": "b" }] }));

        assert_eq!(doc.connectors()[0].connector_type(), DEFAULT_CONNECTOR_TYPE);
    }

    #[test]
    fn test_connector_missing_endpoint() {
        let doc = from_json(json!({ "connectors": [{ "fromShape": "a" }] }));

        assert_eq!(doc.connectors()[0].to_shape(), None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let doc = from_json(json!({
            "version": 3,
            "shapes": [{ "id": "a", "color": "red" }],
            "connectors": [{ "fromShape": "a", "toShape": "a", "weight": 2 }]
        }));

        assert_eq!(doc.shapes().len(), 1);
        assert_eq!(doc.connectors().len(), 1);
    }

    #[test]
    fn test_builder_matches_deserialized() {
        let built = Document::new()
            .with_name("Flow")
            .with_shape(Shape::new(0.0, 0.0).with_id("a"))
            .with_connector(Connector::new("a", "a"));
        let parsed = from_json(json!({
            "name": "Flow",
            "shapes": [{ "id": "a", "x": 0, "y": 0 }],
            "connectors": [{ "fromShape": "a", "toShape": "a" }]
        }));

        assert_eq!(built, parsed);
    }
}
