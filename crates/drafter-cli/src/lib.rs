//! CLI logic for the Drafter diagram importer.
//!
//! The CLI imports one JSON description into a [`MemoryCanvas`] seeded from
//! the configured catalog and writes the resulting drawing as a JSON snapshot.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use drafter::{DiagramImporter, DrafterError, canvas::MemoryCanvas, source::PathSelector};

/// Run the Drafter CLI application.
///
/// Imports `args.input` and writes the canvas snapshot to `args.output`, or
/// to stdout when no output path is given. Items that failed to build are
/// logged as warnings and do not fail the run.
///
/// # Errors
///
/// Returns [`DrafterError`] for:
/// - Configuration loading errors
/// - File I/O errors
/// - Parse errors
/// - Canvas errors that prevent creating the drawing
pub fn run(args: &Args) -> Result<(), DrafterError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Importing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mut canvas = MemoryCanvas::with_catalog(app_config.canvas().clone());
    let importer = DiagramImporter::new(app_config);

    let mut selector = PathSelector::new(&args.input);
    let Some(report) = importer.import_file(&mut canvas, &mut selector)? else {
        info!("Nothing selected, no output written");
        return Ok(());
    };

    for failure in report.failures() {
        warn!(failure:%; "Item not imported");
    }
    info!(summary:% = report; "Import finished");

    let snapshot = serde_json::to_string_pretty(&canvas.snapshot()).map_err(io::Error::from)?;
    match &args.output {
        Some(path) => {
            fs::write(path, snapshot)?;
            info!(output_file = path.as_str(); "Snapshot written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{snapshot}")?;
        }
    }

    Ok(())
}
