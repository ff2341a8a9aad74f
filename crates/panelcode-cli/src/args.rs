//! Command-line argument definitions for the Panelcode CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and error handling.

use clap::Parser;

/// Command-line arguments for the Panelcode layout renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Panelcode file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output HTML file
    #[arg(short, long, default_value = "out.html")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the escaped source instead of failing on syntax errors
    #[arg(long)]
    pub passthrough: bool,
}
