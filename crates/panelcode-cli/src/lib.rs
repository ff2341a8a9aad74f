//! CLI logic for the Panelcode layout renderer.
//!
//! This module contains the core CLI logic: reading a Panelcode file,
//! stripping comments, rendering it to HTML and writing the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use panelcode::{PanelcodeBuilder, PanelcodeError, export::html};

use error_adapter::{DiagnosticAdapter, render_report};

/// Run the Panelcode CLI application
///
/// This function processes the input file through the Panelcode pipeline
/// and writes the resulting HTML to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PanelcodeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors, unless `--passthrough` is set
/// - Export errors
pub fn run(args: &Args) -> Result<(), PanelcodeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let raw = fs::read_to_string(&args.input)?;
    let source = panelcode_parser::strip_comments(&raw);

    let builder = PanelcodeBuilder::new(app_config);
    let output = match builder.parse(&source) {
        Ok(document) => {
            let summary = document.summary();
            info!(
                galleries = summary.galleries,
                spreads = summary.spreads,
                layouts = summary.layouts,
                panel_groups = summary.panel_groups,
                units = summary.units;
                "Document summary"
            );
            builder.render_html(&document)?
        }
        Err(PanelcodeError::Parse { err, .. }) if args.passthrough => {
            for diag in err.into_warnings() {
                // Report against the file as written, comments included.
                warn!("{}", render_report(&DiagnosticAdapter::new(&diag, &raw)));
            }
            html::preformatted(&raw)
        }
        Err(err) => return Err(with_original_source(err, raw)),
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "HTML exported successfully");

    Ok(())
}

/// Point parse diagnostics at the file as written rather than the
/// comment-free copy. Offsets are identical, so only the text changes.
fn with_original_source(err: PanelcodeError, raw: String) -> PanelcodeError {
    match err {
        PanelcodeError::Parse { err, .. } => PanelcodeError::new_parse_error(err, raw),
        other => other,
    }
}
