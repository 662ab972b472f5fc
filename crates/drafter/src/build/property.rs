use log::trace;
use serde_json::Value;

use drafter_core::{
    canvas::{Canvas, CanvasError, CanvasOp, ShapeHandle},
    formula,
};

use crate::error::PropertyError;

/// Creates or updates the custom property `name` on `shape`.
///
/// The row is added only when the shape does not already have it. Its value
/// formula is set to the quoted [`value_text`] and its label formula to the
/// quoted property name, so applying the same property twice leaves a single
/// row with the same content.
///
/// # Errors
///
/// Returns a [`PropertyError`] for the first canvas call that fails.
pub fn set_property<C>(
    canvas: &mut C,
    shape: ShapeHandle,
    name: &str,
    value: &Value,
) -> Result<(), PropertyError>
where
    C: Canvas + ?Sized,
{
    let fail = |err: CanvasError| PropertyError::new(name, err);

    let cell = match canvas.property_cell(shape, name).map_err(fail)? {
        Some(cell) => cell,
        None => {
            canvas.add_property_row(shape, name).map_err(fail)?;
            canvas
                .property_cell(shape, name)
                .map_err(fail)?
                .ok_or_else(|| {
                    fail(CanvasError::rejected(
                        CanvasOp::PropertyCell,
                        "row is missing after it was added",
                    ))
                })?
        }
    };

    let text = value_text(value);
    canvas
        .set_cell_value_formula(cell, &formula::quote(&text))
        .map_err(fail)?;
    canvas
        .set_cell_label_formula(cell, &formula::quote(name))
        .map_err(fail)?;

    trace!(shape:% = shape, name, value = text.as_str(); "Set property");
    Ok(())
}

/// Renders a JSON property value as cell text.
///
/// Strings are used verbatim, `null` becomes the empty string and everything
/// else is written as compact JSON. Booleans are therefore lowercase `true`
/// and `false`, never `True` or `False`, and a float keeps its fraction: `1.0`
/// is written as `1.0`, not `1`.
///
/// ```
/// # use drafter::build::value_text;
/// # use serde_json::json;
/// assert_eq!(value_text(&json!("10.0.0.1")), "10.0.0.1");
/// assert_eq!(value_text(&json!(24)), "24");
/// assert_eq!(value_text(&json!(true)), "true");
/// assert_eq!(value_text(&json!(1.0)), "1.0");
/// assert_eq!(value_text(&json!(null)), "");
/// assert_eq!(value_text(&json!(["a", 1])), r#"["a",1]"#);
/// ```
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
