//! Example: Importing a diagram built from the document model
//!
//! Builds a small document in code, imports it onto an in-memory canvas,
//! moves one shape to show that connectors stay glued, and prints the
//! resulting canvas snapshot.

use drafter::{
    DiagramImporter,
    canvas::MemoryCanvas,
    document::{Connector, Document, Shape},
    geometry::Point,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = Document::new()
        .with_name("Three-tier application")
        .with_shape(
            Shape::new(1.0, 4.0)
                .with_id("web")
                .with_text("Web Client")
                .with_property("Protocol", "HTTPS"),
        )
        .with_shape(
            Shape::new(4.0, 4.0)
                .with_id("api")
                .with_text("API Server")
                .with_master("Basic Shapes", "Rounded rectangle")
                .with_property("Replicas", 3),
        )
        .with_shape(
            Shape::new(7.0, 4.0)
                .with_id("db")
                .with_text("PostgreSQL")
                .with_master("Basic Shapes", "Circle"),
        )
        .with_connector(Connector::new("web", "api").with_text("REST"))
        .with_connector(Connector::new("api", "db").with_text("SQL"));

    let mut canvas = MemoryCanvas::new();
    let report = DiagramImporter::default().build(&mut canvas, &document)?;
    println!("Import finished: {report}");

    if let Some(db) = report.identities().get("db") {
        canvas.move_shape(*db, Point::new(7.0, 1.0))?;
        println!("Moved the database shape; its connector followed.");
    }

    println!("{}", serde_json::to_string_pretty(&canvas.snapshot())?);
    Ok(())
}
