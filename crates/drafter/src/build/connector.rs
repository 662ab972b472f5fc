use log::{debug, warn};

use drafter_core::{
    canvas::{Canvas, CanvasError, ConnectorEnd, PageHandle, ShapeHandle},
    document::Connector,
};

use crate::{build::IdentityMap, error::ConnectorError};

/// Creates a dynamic connector between two registered shapes.
///
/// A line is drawn between the pins of both shapes, made dynamic, and each end
/// is glued to its shape so it follows the shape when it moves. Text is
/// applied next and the id is registered last.
///
/// Returns `Ok(None)` without touching the canvas when either endpoint id is
/// not registered.
///
/// # Errors
///
/// Returns a [`ConnectorError`] when `fromShape` or `toShape` is missing, or
/// when a canvas call fails; the id is not registered in either case. A line
/// that was drawn before the failure is deleted again.
pub fn build_connector<C>(
    canvas: &mut C,
    page: PageHandle,
    identities: &mut IdentityMap,
    connector: &Connector,
) -> Result<Option<ShapeHandle>, ConnectorError>
where
    C: Canvas + ?Sized,
{
    let label = connector_label(connector);
    let from_id = connector
        .from_shape()
        .ok_or_else(|| ConnectorError::MissingEndpoint {
            connector: label.clone(),
            field: "fromShape",
        })?;
    let to_id = connector
        .to_shape()
        .ok_or_else(|| ConnectorError::MissingEndpoint {
            connector: label.clone(),
            field: "toShape",
        })?;

    let (Some(from), Some(to)) = (identities.get(from_id), identities.get(to_id)) else {
        debug!(
            connector = label.as_str(),
            from_found = identities.contains(from_id),
            to_found = identities.contains(to_id);
            "Skipping connector with unknown endpoint",
        );
        return Ok(None);
    };

    let fail = |err: CanvasError| ConnectorError::Canvas {
        connector: label.clone(),
        source: err,
    };

    let begin = canvas.pin_position(from).map_err(fail)?;
    let end = canvas.pin_position(to).map_err(fail)?;
    let line = canvas.draw_line(page, begin, end).map_err(fail)?;

    if let Err(err) = attach_line(canvas, line, from, to, connector.text()) {
        if let Err(cleanup) = canvas.delete_shape(line) {
            warn!(
                connector = label.as_str(),
                line:% = line,
                err:% = cleanup;
                "Left partial connector on the page",
            );
        }
        return Err(fail(err));
    }
    if let Some(id) = connector.id() {
        identities.register(id, line);
    }

    debug!(
        connector = label.as_str(),
        kind = connector.connector_type(),
        line:% = line;
        "Built connector",
    );
    Ok(Some(line))
}

/// Makes a drawn line dynamic, glues both ends and applies its text.
fn attach_line<C>(
    canvas: &mut C,
    line: ShapeHandle,
    from: ShapeHandle,
    to: ShapeHandle,
    text: Option<&str>,
) -> Result<(), CanvasError>
where
    C: Canvas + ?Sized,
{
    canvas.set_dynamic(line)?;
    canvas.glue(line, ConnectorEnd::Begin, from)?;
    canvas.glue(line, ConnectorEnd::End, to)?;
    if let Some(text) = text {
        canvas.set_shape_text(line, text)?;
    }
    Ok(())
}

/// Names a connector for error messages as `from -> to`.
fn connector_label(connector: &Connector) -> String {
    format!(
        "{} -> {}",
        connector.from_shape().unwrap_or("?"),
        connector.to_shape().unwrap_or("?")
    )
}
