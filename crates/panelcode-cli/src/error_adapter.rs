//! miette reports for [`PanelcodeError`].
//!
//! A parse error yields one report per diagnostic, drawn over the source
//! text. Every other variant yields a single report with a `panelcode::*`
//! code and no snippet.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan,
};

use panelcode::PanelcodeError;
use panelcode_parser::{
    Span,
    error::{Diagnostic, LabelStyle, Severity},
};

/// A report ready for [`render_report`].
pub type Report<'a> = Box<dyn MietteDiagnostic + 'a>;

/// A parser diagnostic together with the text its spans point into.
#[derive(Debug)]
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            match label.style() {
                LabelStyle::Primary => LabeledSpan::new_primary_with_span(message, span),
                LabelStyle::Secondary => LabeledSpan::new_with_span(message, span),
            }
        })))
    }
}

/// An error without a source location.
#[derive(Debug)]
struct PlainError<'a>(&'a PanelcodeError);

impl fmt::Display for PlainError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for PlainError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for PlainError<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            PanelcodeError::Io(_) => "panelcode::io",
            PanelcodeError::Parse { .. } => return None,
            PanelcodeError::Config(_) => "panelcode::config",
            PanelcodeError::Export(_) => "panelcode::export",
        };
        Some(Box::new(code))
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split `err` into the reports to print, in order.
pub fn to_reports(err: &PanelcodeError) -> Vec<Report<'_>> {
    match err {
        PanelcodeError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(DiagnosticAdapter::new(diag, src)) as Report<'_>)
            .collect(),
        _ => vec![Box::new(PlainError(err)) as Report<'_>],
    }
}

/// Render a report with miette's graphical handler, or as its plain message
/// if that fails.
pub fn render_report(report: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, report) {
        Ok(()) => writer,
        Err(_) => report.to_string(),
    }
}
