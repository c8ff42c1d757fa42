//! CLI logic for the Treehopper diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use treehopper::{DiagramBuilder, TreehopperError};

/// Run the Treehopper CLI application
///
/// Reads the input definition, writes the SVG diagram to the output path
/// and, when requested, the JSON dump next to it.
///
/// # Errors
///
/// Returns `TreehopperError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TreehopperError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing definition"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let builder = DiagramBuilder::new(app_config);
    let session = builder.open(&args.input)?;

    let svg = builder.render_svg(&session)?;
    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if let Some(dump_path) = &args.dump {
        let json = builder.dump_json(&session)?;
        fs::write(dump_path, json)?;
        info!(dump_file = dump_path; "Component dump written");
    }

    Ok(())
}
