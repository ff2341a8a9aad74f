//! Panelcode CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use panelcode_cli::{
    Args,
    error_adapter::{render_report, to_reports},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Panelcode");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = panelcode_cli::run(&args) {
        for report in to_reports(&err) {
            error!("{}", render_report(&*report));
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
