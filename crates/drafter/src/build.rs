//! The construction engine.
//!
//! [`DocumentBuilder`] drives one import: it acquires a document and page,
//! builds every shape and then every connector, fits the page and releases
//! stencils it opened. Shapes and connectors are built in isolation; their
//! failures land in the [`ImportReport`] instead of aborting the import.

mod connector;
mod document;
mod identity;
mod property;
mod report;
mod shape;
mod template;

pub use connector::build_connector;
pub use document::DocumentBuilder;
pub use identity::IdentityMap;
pub use property::{set_property, value_text};
pub use report::{ImportReport, ItemFailure};
pub use shape::{BuiltShape, build_shape};
pub use template::{StencilStrategy, TemplateResolver};
