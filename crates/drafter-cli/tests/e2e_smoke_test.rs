use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use drafter_cli::{Args, run};

fn samples_dir() -> PathBuf {
    // Samples live at the workspace root, two levels above this crate
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .unwrap()
        .join("samples")
}

/// Collects all .json files from a directory, sorted by path
fn collect_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_json_files(&samples_dir());

    assert!(!samples.is_empty(), "No samples found in samples/");

    let mut failed = Vec::new();
    for sample in &samples {
        let output = temp_dir.path().join(sample.file_name().unwrap());

        match run(&args_for(sample, &output)) {
            Ok(()) => {
                let written = fs::read_to_string(&output).expect("snapshot written");
                let snapshot: Value = serde_json::from_str(&written).expect("snapshot is JSON");
                assert!(snapshot["documents"].is_array(), "{}", sample.display());
            }
            Err(err) => failed.push((sample.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nSamples that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} sample(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_json_files(&samples_dir().join("errors"));

    assert!(!samples.is_empty(), "No error samples found in samples/errors/");

    let mut succeeded = Vec::new();
    for sample in &samples {
        let output = temp_dir.path().join(format!(
            "error_{}",
            sample.file_name().unwrap().to_string_lossy()
        ));

        if run(&args_for(sample, &output)).is_ok() {
            succeeded.push(sample.clone());
        }
        assert!(!output.exists(), "{} wrote a snapshot", sample.display());
    }

    if !succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!("{} error sample(s) succeeded unexpectedly", succeeded.len());
    }
}

#[test]
fn e2e_network_snapshot_contents() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("network.json");

    run(&args_for(&samples_dir().join("network.json"), &output)).unwrap();

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let documents = snapshot["documents"].as_array().unwrap();

    // The stencil opened for the import is released, so only the drawing remains open
    let drawing = documents
        .iter()
        .find(|doc| doc["kind"] == "drawing")
        .unwrap();
    assert_eq!(drawing["title"], "Office Network");
    assert_eq!(drawing["template"], "Basic Diagram.vst");

    let page = &drawing["pages"][0];
    assert_eq!(page["shapes"].as_array().unwrap().len(), 4);
    assert_eq!(page["connectors"].as_array().unwrap().len(), 3);
    assert!(page["bounds"].is_object());

    let uplink = &page["connectors"][0];
    assert_eq!(uplink["text"], "10 GbE");
    assert_eq!(uplink["from"], "Firewall");
    assert_eq!(uplink["to"], "Core Switch");
    assert_eq!(uplink["dynamic"], true);

    let switch = page["shapes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|shape| shape["name"] == "Core Switch")
        .unwrap();
    assert_eq!(switch["source"], "Basic Shapes.vss/Rounded rectangle");
    let ports = switch["properties"]
        .as_array()
        .unwrap()
        .iter()
        .find(|prop| prop["name"] == "Ports")
        .unwrap();
    assert_eq!(ports["value"], "48");
    assert_eq!(ports["label"], "Ports");

    assert!(
        documents
            .iter()
            .filter(|doc| doc["kind"] == "stencil")
            .all(|doc| doc["open"] == false)
    );
}

#[test]
fn e2e_config_catalog_limits_masters() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        r#"
[import]
resize_page = false

[canvas]
templates = ["Basic Diagram.vst"]

[canvas.stencils]
"Basic Shapes.vss" = ["Square"]
"#,
    )
    .unwrap();
    let output = temp_dir.path().join("out.json");

    let mut args = args_for(&samples_dir().join("network.json"), &output);
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).unwrap();

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let page = &snapshot["documents"][0]["pages"][0];

    // Masters missing from the catalog fall back to rectangles
    let sources: Vec<&str> = page["shapes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|shape| shape["source"].as_str().unwrap())
        .collect();
    assert_eq!(
        sources,
        [
            "rectangle",
            "rectangle",
            "Basic Shapes.vss/Square",
            "rectangle"
        ]
    );
    assert!(page["bounds"].is_null());
}

#[test]
fn e2e_missing_config_file_fails() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.json");

    let mut args = args_for(&samples_dir().join("empty.json"), &output);
    args.config = Some(temp_dir.path().join("nope.toml").to_string_lossy().to_string());

    assert!(matches!(run(&args), Err(drafter::DrafterError::Config(_))));
}
