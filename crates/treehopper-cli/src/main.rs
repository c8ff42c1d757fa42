//! Treehopper CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use treehopper::TreehopperError;
use treehopper_cli::{Args, error_adapter::reports_for};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!("Starting Treehopper");
    debug!(args:?; "Parsed arguments");

    match treehopper_cli::run(&args) {
        Ok(()) => info!("Completed successfully"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Installs `env_logger`, falling back to `warn` on an unknown level name.
fn init_logger(level: &str) {
    let (filter, valid) = match LevelFilter::from_str(level) {
        Ok(filter) => (filter, true),
        Err(_) => (LevelFilter::Warn, false),
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();

    if !valid {
        warn!(level; "Invalid log level, using 'warn' instead");
    }
}

/// Prints every diagnostic of `err` to stderr, one miette report each.
fn report(err: &TreehopperError) {
    let handler = miette::GraphicalReportHandler::new();

    for report in reports_for(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &report) {
            Ok(()) => eprintln!("{rendered}"),
            Err(_) => eprintln!("error: {report}"),
        }
    }
}
