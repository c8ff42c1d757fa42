//! Command-line argument definitions for the Treehopper CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the optional JSON
//! dump, configuration file selection, and logging verbosity.

use clap::Parser;

/// Render a Grasshopper .ghx definition as an SVG component diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input .ghx file
    #[arg(help = "Path to the input .ghx file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Also write the extracted components as JSON to this path
    #[arg(long)]
    pub dump: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
