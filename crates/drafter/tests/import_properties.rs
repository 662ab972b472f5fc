//! Property-based checks of the shape and connector counts of an import.

use proptest::prelude::*;
use serde_json::{Value, json};

use drafter::{DiagramImporter, canvas::MemoryCanvas};

/// One connector endpoint: an index into the shapes, or an id nobody declared.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Shape(usize),
    Ghost(usize),
}

impl Endpoint {
    fn id(self) -> String {
        match self {
            Endpoint::Shape(index) => format!("s{index}"),
            Endpoint::Ghost(index) => format!("ghost{index}"),
        }
    }

    fn resolves(self) -> bool {
        matches!(self, Endpoint::Shape(_))
    }
}

// ===================
// Strategies
// ===================

fn endpoint_strategy(shapes: usize) -> impl Strategy<Value = Endpoint> {
    prop_oneof![
        3 => (0..shapes).prop_map(Endpoint::Shape),
        1 => (0..4usize).prop_map(Endpoint::Ghost),
    ]
}

fn diagram_strategy() -> impl Strategy<Value = (usize, Vec<(Endpoint, Endpoint)>)> {
    (1..12usize).prop_flat_map(|shapes| {
        let edge = (endpoint_strategy(shapes), endpoint_strategy(shapes));
        (Just(shapes), prop::collection::vec(edge, 0..20))
    })
}

/// Builds a description that lists its connectors before its shapes.
fn description(shapes: usize, edges: &[(Endpoint, Endpoint)]) -> String {
    let connectors: Vec<Value> = edges
        .iter()
        .map(|(from, to)| json!({ "fromShape": from.id(), "toShape": to.id() }))
        .collect();
    let shapes: Vec<Value> = (0..shapes)
        .map(|index| json!({ "id": format!("s{index}"), "x": index * 2, "y": 1 }))
        .collect();

    json!({ "connectors": connectors, "shapes": shapes }).to_string()
}

// ===================
// Property Test Functions
// ===================

/// Every shape is built, every resolvable connector is built, and every
/// dangling connector is skipped without a failure.
fn check_counts_follow_declarations(
    shapes: usize,
    edges: &[(Endpoint, Endpoint)],
) -> Result<(), TestCaseError> {
    let resolvable = edges
        .iter()
        .filter(|(from, to)| from.resolves() && to.resolves())
        .count();
    let mut canvas = MemoryCanvas::new();

    let report = DiagramImporter::default()
        .import_json(&mut canvas, &description(shapes, edges))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    prop_assert_eq!(report.shapes_created(), shapes);
    prop_assert_eq!(report.connectors_created(), resolvable);
    prop_assert_eq!(report.connectors_skipped(), edges.len() - resolvable);
    prop_assert!(report.is_clean(), "failures: {:?}", report.failures());

    let on_page: Vec<_> = canvas.shapes_on(report.page()).collect();
    prop_assert_eq!(on_page.iter().filter(|s| !s.is_connector()).count(), shapes);
    prop_assert_eq!(on_page.iter().filter(|s| s.is_connector()).count(), resolvable);
    Ok(())
}

proptest! {
    #[test]
    fn counts_follow_declarations((shapes, edges) in diagram_strategy()) {
        check_counts_follow_declarations(shapes, &edges)?;
    }
}
