//! Command-line argument definitions for the Drafter CLI.

use clap::Parser;

/// Imports a JSON diagram description and prints the resulting drawing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON diagram description
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Where to write the canvas snapshot; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
