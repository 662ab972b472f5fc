//! Integration tests for importing descriptions onto a `MemoryCanvas`.

use std::{fs, path::PathBuf};

use drafter::{
    DiagramImporter, DrafterError, ItemFailure,
    canvas::{Canvas, CanvasOp, Catalog, ConnectorEnd, MemoryCanvas, OpenMode, ShapeKind},
    config::{AppConfig, ImportConfig},
    document::{Connector, Document, Shape},
    geometry::Point,
    source::{FileFilter, PathSelector},
};

fn import(canvas: &mut MemoryCanvas, json: &str) -> drafter::ImportReport {
    DiagramImporter::default()
        .import_json(canvas, json)
        .expect("Failed to import")
}

#[test]
fn test_simple_pair_with_connector() {
    let json = r#"{
        "shapes": [{ "id": "a", "x": 0, "y": 0 }, { "id": "b", "x": 2, "y": 0 }],
        "connectors": [{ "fromShape": "a", "toShape": "b", "text": "flows to" }]
    }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.shapes_created(), 2);
    assert_eq!(report.shapes_from_master(), 2);
    assert_eq!(report.connectors_created(), 1);
    assert!(report.is_clean());

    let a = canvas.shape(report.identities()["a"]).unwrap();
    let b = canvas.shape(report.identities()["b"]).unwrap();
    assert_eq!(a.pin(), Point::new(0.0, 0.0));
    assert_eq!(b.pin(), Point::new(2.0, 0.0));
    assert_eq!(
        a.kind(),
        &ShapeKind::Master {
            stencil: "Basic Shapes.vss".to_string(),
            master: "Rectangle".to_string(),
        }
    );

    let line = canvas
        .shapes_on(report.page())
        .find(|shape| shape.is_connector())
        .unwrap();
    let connector = line.connector().unwrap();
    assert_eq!(line.text(), Some("flows to"));
    assert!(connector.is_dynamic());
    assert_eq!(connector.glued(ConnectorEnd::Begin), Some(a.handle()));
    assert_eq!(connector.glued(ConnectorEnd::End), Some(b.handle()));
}

#[test]
fn test_custom_property() {
    let json = r#"{ "shapes": [{ "id": "a", "properties": { "Owner": "Alice" } }] }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    let shape = canvas.shape(report.identities()["a"]).unwrap();
    assert_eq!(shape.properties().len(), 1);
    let owner = shape.property("Owner").unwrap();
    assert_eq!(owner.value().as_deref(), Some("Alice"));
    assert_eq!(owner.label().as_deref(), Some("Owner"));
}

#[test]
fn test_property_values_are_text() {
    let json = r#"{ "shapes": [{
        "id": "a",
        "properties": { "Ports": 24, "Managed": true, "Notes": null, "Tags": ["x", "y"] }
    }] }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    let shape = canvas.shape(report.identities()["a"]).unwrap();
    let values: Vec<_> = shape
        .properties()
        .values()
        .map(|property| property.value().unwrap())
        .collect();
    assert_eq!(values, ["24", "true", "", r#"["x","y"]"#]);
}

#[test]
fn test_blank_and_templated_documents() {
    let mut canvas = MemoryCanvas::new();

    let blank = import(&mut canvas, r#"{ "template": "", "shapes": [] }"#);
    let templated = import(&mut canvas, r#"{ "template": "Basic Diagram.vst" }"#);

    assert_eq!(canvas.document(blank.document()).unwrap().template(), None);
    assert_eq!(
        canvas.document(templated.document()).unwrap().template(),
        Some("Basic Diagram.vst")
    );
}

#[test]
fn test_unknown_template_is_fatal() {
    let mut canvas = MemoryCanvas::new();

    let err = DiagramImporter::default()
        .import_json(&mut canvas, r#"{ "template": "Missing.vst" }"#)
        .unwrap_err();

    assert!(matches!(err, DrafterError::Canvas(_)));
    assert_eq!(canvas.drawings().count(), 0);
}

#[test]
fn test_malformed_json_creates_nothing() {
    let mut canvas = MemoryCanvas::new();

    let err = DiagramImporter::default()
        .import_json(&mut canvas, r#"{ "shapes": [ { "id": "a" "#)
        .unwrap_err();

    match err {
        DrafterError::Parse { err, src } => {
            assert!(err.diagnostic().to_string().starts_with("error[E101]"));
            assert!(src.starts_with("{ \"shapes\""));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert!(canvas.documents().is_empty());
}

#[test]
fn test_dangling_connectors_are_skipped() {
    let json = r#"{
        "shapes": [{ "id": "a" }, { "id": "b", "x": 3 }],
        "connectors": [
            { "fromShape": "a", "toShape": "b" },
            { "fromShape": "a", "toShape": "ghost" },
            { "fromShape": "", "toShape": "b" }
        ]
    }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.connectors_created(), 1);
    assert_eq!(report.connectors_skipped(), 2);
    assert!(report.is_clean());
}

#[test]
fn test_connector_missing_endpoint_is_reported() {
    let json = r#"{
        "shapes": [{ "id": "a" }],
        "connectors": [{ "fromShape": "a" }]
    }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.connectors_created(), 0);
    assert_eq!(report.failures().len(), 1);
    assert!(matches!(report.failures()[0], ItemFailure::Connector(_)));
}

#[test]
fn test_connectors_declared_before_shapes() {
    let json = r#"{
        "connectors": [{ "id": "c", "fromShape": "late", "toShape": "later" }],
        "shapes": [{ "id": "late", "x": 0 }, { "id": "later", "x": 5 }]
    }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.connectors_created(), 1);
    assert!(report.identities().contains_key("c"));
}

#[test]
fn test_unresolvable_stencil_still_creates_shape() {
    let json = r#"{ "shapes": [
        { "id": "a", "stencil": "Cloud Shapes", "master": "Cloud", "x": 1, "y": 1, "width": 2, "height": 1 }
    ] }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.shapes_created(), 1);
    assert_eq!(report.shapes_from_master(), 0);
    let shape = canvas.shape(report.identities()["a"]).unwrap();
    assert_eq!(shape.kind(), &ShapeKind::Rectangle);
    assert_eq!(shape.bounds().max_point(), Point::new(3.0, 2.0));
}

#[test]
fn test_null_master_draws_rectangle() {
    let json = r#"{ "shapes": [{ "id": "a", "stencil": null }] }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    let shape = canvas.shape(report.identities()["a"]).unwrap();
    assert_eq!(shape.kind(), &ShapeKind::Rectangle);
    assert!(report.stencils_released().is_empty());
}

#[test]
fn test_failing_shape_does_not_stop_import() {
    let json = r#"{
        "shapes": [
            { "id": "a", "text": "ok" },
            { "id": "b", "text": "boom" },
            { "id": "c", "text": "fine", "x": 4 }
        ],
        "connectors": [
            { "fromShape": "a", "toShape": "b" },
            { "fromShape": "a", "toShape": "c" }
        ]
    }"#;
    let mut canvas = MemoryCanvas::new();
    canvas.inject_fault_for(CanvasOp::SetShapeText, "boom");

    let report = DiagramImporter::default()
        .import_json(&mut canvas, json)
        .unwrap();

    assert_eq!(report.shapes_created(), 2);
    assert!(!report.identities().contains_key("b"));
    assert_eq!(report.connectors_created(), 1);
    assert_eq!(report.connectors_skipped(), 1);
    match &report.failures()[..] {
        [ItemFailure::Shape(err)] => assert_eq!(err.shape(), "b"),
        other => panic!("unexpected failures: {other:?}"),
    }
}

#[test]
fn test_title_failure_is_best_effort() {
    let mut canvas = MemoryCanvas::new();
    canvas.inject_fault(CanvasOp::SetDocumentTitle);

    let report = import(&mut canvas, r#"{ "name": "Net", "shapes": [{ "id": "a" }] }"#);

    assert_eq!(report.shapes_created(), 1);
    assert!(matches!(report.failures(), [ItemFailure::Title(_)]));
}

#[test]
fn test_document_title_is_set() {
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, r#"{ "name": "Office Network" }"#);

    assert_eq!(
        canvas.document(report.document()).unwrap().title(),
        "Office Network"
    );
}

#[test]
fn test_page_is_resized_to_contents() {
    let json = r#"{ "shapes": [
        { "stencil": "", "x": 0, "y": 0 },
        { "stencil": "", "x": 5, "y": 3, "width": 2, "height": 2 }
    ] }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    let bounds = canvas.page(report.page()).unwrap().bounds().unwrap();
    assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
    assert_eq!(bounds.max_point(), Point::new(7.0, 5.0));
}

#[test]
fn test_page_resize_can_be_disabled() {
    let config = AppConfig::new(
        ImportConfig::default().with_resize_page(false),
        Catalog::default(),
    );
    let mut canvas = MemoryCanvas::new();

    let report = DiagramImporter::new(config)
        .import_json(&mut canvas, r#"{ "shapes": [{}] }"#)
        .unwrap();

    assert_eq!(canvas.page(report.page()).unwrap().bounds(), None);
}

#[test]
fn test_opened_stencils_are_released() {
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, r#"{ "shapes": [{ "id": "a" }, { "id": "b" }] }"#);

    assert_eq!(report.stencils_released(), ["Basic Shapes.vss"]);
    assert!(canvas.open_documents().iter().all(|doc| doc.name != "Basic Shapes.vss"));
}

#[test]
fn test_preopened_stencils_stay_open() {
    let mut canvas = MemoryCanvas::new();
    let stencil = canvas
        .open_stencil("Basic Shapes.vss", OpenMode::Docked)
        .unwrap();

    let report = import(&mut canvas, r#"{ "shapes": [{ "id": "a" }] }"#);

    assert_eq!(report.shapes_from_master(), 1);
    assert!(report.stencils_released().is_empty());
    assert!(canvas.document(stencil).unwrap().is_open());
}

#[test]
fn test_stencil_release_can_be_disabled() {
    let config = AppConfig::new(
        ImportConfig::default().with_release_stencils(false),
        Catalog::default(),
    );
    let mut canvas = MemoryCanvas::new();

    let report = DiagramImporter::new(config)
        .import_json(&mut canvas, r#"{ "shapes": [{}] }"#)
        .unwrap();

    assert!(report.stencils_released().is_empty());
    assert!(canvas.open_documents().iter().any(|doc| doc.name == "Basic Shapes.vss"));
}

#[test]
fn test_custom_stencil_extension() {
    let config = AppConfig::new(
        ImportConfig::default().with_stencil_extensions([".vssx"]),
        Catalog::default(),
    );
    let mut canvas =
        MemoryCanvas::with_catalog(Catalog::empty().with_stencil("Network.vssx", ["Router"]));

    let report = DiagramImporter::new(config)
        .import_json(
            &mut canvas,
            r#"{ "shapes": [{ "id": "r", "stencil": "Network", "master": "Router" }] }"#,
        )
        .unwrap();

    assert_eq!(report.shapes_from_master(), 1);
    assert_eq!(report.stencils_released(), ["Network.vssx"]);
}

#[test]
fn test_glue_is_live_after_import() {
    let json = r#"{
        "shapes": [{ "id": "a", "x": 0, "y": 0 }, { "id": "b", "x": 2, "y": 0 }],
        "connectors": [{ "id": "c", "fromShape": "a", "toShape": "b" }]
    }"#;
    let mut canvas = MemoryCanvas::new();
    let report = import(&mut canvas, json);

    canvas
        .move_shape(report.identities()["b"], Point::new(6.0, 3.0))
        .unwrap();

    let line = canvas.shape(report.identities()["c"]).unwrap();
    assert_eq!(line.connector().unwrap().end(), Point::new(6.0, 3.0));
    assert_eq!(line.connector().unwrap().begin(), Point::new(0.0, 0.0));
}

#[test]
fn test_duplicate_ids_last_write_wins() {
    let json = r#"{
        "shapes": [{ "id": "a", "name": "first" }, { "id": "a", "name": "second", "x": 3 }],
        "connectors": [{ "id": "c", "fromShape": "a", "toShape": "a" }]
    }"#;
    let mut canvas = MemoryCanvas::new();

    let report = import(&mut canvas, json);

    assert_eq!(report.shapes_created(), 2);
    let winner = canvas.shape(report.identities()["a"]).unwrap();
    assert_eq!(winner.name(), "second");
}

#[test]
fn test_build_from_model() {
    let document = Document::new()
        .with_name("Model")
        .with_shape(Shape::new(0.0, 0.0).with_id("x"))
        .with_shape(Shape::new(3.0, 0.0).with_id("y").without_master())
        .with_connector(Connector::new("x", "y").with_text("to"));
    let mut canvas = MemoryCanvas::new();

    let report = DiagramImporter::default()
        .build(&mut canvas, &document)
        .unwrap();

    assert_eq!(report.shapes_created(), 2);
    assert_eq!(report.shapes_from_master(), 1);
    assert_eq!(report.connectors_created(), 1);
}

#[test]
fn test_import_through_dyn_canvas() {
    let mut canvas = MemoryCanvas::new();
    let dyn_canvas: &mut dyn Canvas = &mut canvas;

    let report = DiagramImporter::default()
        .import_json(dyn_canvas, r#"{ "shapes": [{ "id": "a" }] }"#)
        .unwrap();

    assert_eq!(report.shapes_created(), 1);
}

#[test]
fn test_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.json");
    fs::write(&path, r#"{ "shapes": [{ "id": "a" }] }"#).unwrap();
    let mut canvas = MemoryCanvas::new();

    let report = DiagramImporter::default()
        .import_file(&mut canvas, &mut PathSelector::new(&path))
        .unwrap()
        .unwrap();

    assert_eq!(report.shapes_created(), 1);
}

#[test]
fn test_import_file_cancelled() {
    let mut canvas = MemoryCanvas::new();
    let mut offered = None;
    let mut selector = |filters: &[FileFilter]| -> Option<PathBuf> {
        offered = Some(filters.iter().map(|filter| filter.description).collect::<Vec<_>>());
        None
    };

    let result = DiagramImporter::default()
        .import_file(&mut canvas, &mut selector)
        .unwrap();

    assert!(result.is_none());
    assert_eq!(
        offered.as_deref(),
        Some(&["JSON files (*.json)", "All files (*.*)"][..])
    );
    assert!(canvas.documents().is_empty());
}

#[test]
fn test_import_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = MemoryCanvas::new();

    let err = DiagramImporter::default()
        .import_file(&mut canvas, &mut PathSelector::new(dir.path().join("none.json")))
        .unwrap_err();

    assert!(matches!(err, DrafterError::Io(_)));
}
