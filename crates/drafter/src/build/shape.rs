use log::{debug, warn};

use drafter_core::{
    canvas::{Canvas, CanvasError, PageHandle, ShapeHandle},
    document::Shape,
};

use crate::{
    build::{IdentityMap, TemplateResolver, set_property},
    error::{PropertyError, ShapeError},
};

/// The result of building one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltShape {
    handle: ShapeHandle,
    from_master: bool,
    property_failures: Vec<PropertyError>,
}

impl BuiltShape {
    pub fn handle(&self) -> ShapeHandle {
        self.handle
    }

    /// Returns true if the shape was dropped from a master rather than drawn
    /// as a rectangle.
    pub fn from_master(&self) -> bool {
        self.from_master
    }

    /// Returns the properties that could not be written.
    pub fn property_failures(&self) -> &[PropertyError] {
        &self.property_failures
    }
}

/// Creates one canvas shape for `shape`.
///
/// The shape is dropped from its master when it names both a stencil and a
/// master and the [`TemplateResolver`] finds them; otherwise a rectangle of
/// the shape's size is drawn with its minimum corner at the shape's position.
/// Name, text and properties are applied next, and the id is registered last.
///
/// `index` is the shape's position in the document and labels errors for
/// shapes without a name or id.
///
/// # Errors
///
/// Returns a [`ShapeError`] when drawing the shape or setting its name or
/// text fails; the id is not registered in that case. Property failures are
/// returned in [`BuiltShape::property_failures`] instead.
pub fn build_shape<C>(
    canvas: &mut C,
    page: PageHandle,
    resolver: &mut TemplateResolver,
    identities: &mut IdentityMap,
    shape: &Shape,
    index: usize,
) -> Result<BuiltShape, ShapeError>
where
    C: Canvas + ?Sized,
{
    let fail = |err: CanvasError| ShapeError::new(shape_label(shape, index), err);

    let dropped = shape.master_ref().and_then(|(stencil, master)| {
        resolver.resolve(canvas, page, stencil, master, shape.position())
    });
    let from_master = dropped.is_some();
    let handle = match dropped {
        Some(handle) => handle,
        None => {
            if let Some((stencil, master)) = shape.master_ref() {
                debug!(stencil, master, index; "Falling back to a rectangle");
            }
            let bounds = shape.position().to_bounds(shape.size());
            canvas.draw_rectangle(page, bounds).map_err(fail)?
        }
    };

    if let Some(name) = shape.name() {
        canvas.set_shape_name(handle, name).map_err(fail)?;
    }
    if let Some(text) = shape.text() {
        canvas.set_shape_text(handle, text).map_err(fail)?;
    }

    let mut property_failures = Vec::new();
    for (name, value) in shape.properties() {
        if let Err(err) = set_property(canvas, handle, name, value) {
            warn!(shape = shape_label(shape, index).as_str(), err:%; "Property not set");
            property_failures.push(err);
        }
    }

    if let Some(id) = shape.id() {
        identities.register(id, handle);
    }

    Ok(BuiltShape {
        handle,
        from_master,
        property_failures,
    })
}

/// Names a shape for error messages: its name, else its id, else `#index`.
pub(crate) fn shape_label(shape: &Shape, index: usize) -> String {
    shape
        .name()
        .or(shape.id())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"))
}
